//! Ordered multimap over urlencoded form fields.
//!
//! The group submission forms use repeated keys (`preferences[]`,
//! `prices[]`, ...) whose order is significant, so the body is kept as
//! the raw pair list rather than flattened into a map.

use crate::error::AppError;

/// Parsed form fields in submission order.
#[derive(Debug, Clone)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    /// Parse a `application/x-www-form-urlencoded` body.
    pub fn parse(bytes: &[u8]) -> Result<Self, AppError> {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(bytes)
            .map(Self)
            .map_err(|e| AppError::BadRequest(format!("Malformed form body: {e}")))
    }

    /// First value submitted under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` was submitted at all (checkbox semantics).
    pub fn has(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// All values submitted under `key`, in submission order.
    pub fn list(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_bracket_keys_in_order() {
        let fields = FormFields::parse(
            b"name=Sizes&preferences[]=Small&prices[]=0&preferences[]=Large&prices[]=2.50",
        )
        .unwrap();
        assert_eq!(fields.get("name"), Some("Sizes"));
        assert_eq!(fields.list("preferences[]"), vec!["Small", "Large"]);
        assert_eq!(fields.list("prices[]"), vec!["0", "2.50"]);
    }

    #[test]
    fn decodes_percent_escapes() {
        let fields = FormFields::parse(b"pricingMethod=Group+Pricing&name=S%26P").unwrap();
        assert_eq!(fields.get("pricingMethod"), Some("Group Pricing"));
        assert_eq!(fields.get("name"), Some("S&P"));
    }

    #[test]
    fn absent_keys_are_distinguishable_from_empty_values() {
        let fields = FormFields::parse(b"multiple_selection=&name=X").unwrap();
        assert!(fields.has("multiple_selection"));
        assert_eq!(fields.get("multiple_selection"), Some(""));
        assert!(!fields.has("rules_json"));
        assert_eq!(fields.get("rules_json"), None);
        assert!(fields.list("preferences[]").is_empty());
    }
}
