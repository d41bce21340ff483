//! Preference-group field types and form-value parsing.
//!
//! Groups come in two kinds: Independent (a flat list of selectable
//! options) and Dependent (an ingredient x column rule matrix). The
//! parsing helpers here implement the tolerant form-field policy: bad
//! price strings become `0.0` instead of rejecting the submission, and
//! blank child rows are dropped before order indices are assigned.

use serde::Serialize;

use crate::error::CoreError;

/// Default minimum selection count when `minPref` is absent.
pub const DEFAULT_MIN_PREF: i64 = 1;

/// Default maximum selection count when `maxPref` is absent.
pub const DEFAULT_MAX_PREF: i64 = 10;

// ---------------------------------------------------------------------------
// Group kind
// ---------------------------------------------------------------------------

/// Whether a group is a flat option list or a rule matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKind {
    Independent,
    Dependent,
}

impl GroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Independent => "Independent",
            Self::Dependent => "Dependent",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Independent" => Ok(Self::Independent),
            "Dependent" => Ok(Self::Dependent),
            _ => Err(CoreError::Validation(format!(
                "Invalid group type '{s}'. Must be Independent or Dependent"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection policy
// ---------------------------------------------------------------------------

/// How options within a group may be selected.
///
/// Dependent groups always carry [`SelectionPolicy::NotApplicable`]; the
/// policy only has meaning for Independent option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionPolicy {
    Optional,
    Required,
    Multiple,
    NotApplicable,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::Required => "required",
            Self::Multiple => "multiple",
            Self::NotApplicable => "N/A",
        }
    }

    /// Parse a submitted `group_option` value. An absent or empty field
    /// falls back to `optional`.
    pub fn from_form_value(s: &str) -> Result<Self, CoreError> {
        match s.trim() {
            "" | "optional" => Ok(Self::Optional),
            "required" => Ok(Self::Required),
            "multiple" => Ok(Self::Multiple),
            "N/A" => Ok(Self::NotApplicable),
            other => Err(CoreError::Validation(format!(
                "Invalid group option '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Pricing method
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PricingMethod {
    NoCharge,
    GroupPricing,
    IndividualPricing,
}

impl PricingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCharge => "No Charge",
            Self::GroupPricing => "Group Pricing",
            Self::IndividualPricing => "Individual Pricing",
        }
    }

    /// Parse a submitted `pricingMethod` value. An absent or empty field
    /// falls back to `No Charge`.
    pub fn from_form_value(s: &str) -> Result<Self, CoreError> {
        match s.trim() {
            "" | "No Charge" => Ok(Self::NoCharge),
            "Group Pricing" => Ok(Self::GroupPricing),
            "Individual Pricing" => Ok(Self::IndividualPricing),
            other => Err(CoreError::Validation(format!(
                "Invalid pricing method '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tolerant field parsing
// ---------------------------------------------------------------------------

/// Parse a submitted price string.
///
/// Absent, empty, or unparseable values become `0.0`. This is a
/// deliberate tolerance policy: a bad price never rejects the whole
/// submission.
pub fn parse_price(s: Option<&str>) -> f64 {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parse a submitted selection-count string, falling back to `default`
/// when absent, empty, or unparseable.
pub fn parse_count(s: Option<&str>, default: i64) -> i64 {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(default)
}

// ---------------------------------------------------------------------------
// Child-row collection
// ---------------------------------------------------------------------------

/// One submitted child row (preference, ingredient, or column) after
/// trimming and filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRow {
    pub name: String,
    pub price: f64,
    pub order_index: i64,
}

/// Collect submitted name/price pairs into ordered child rows.
///
/// Names are trimmed; blank names are dropped. A missing price for a
/// kept name counts as `0.0`. Order indices are contiguous and
/// zero-based over the kept rows, regenerated from submitted order.
pub fn collect_child_rows(names: &[&str], prices: &[&str]) -> Vec<ChildRow> {
    let mut rows = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        rows.push(ChildRow {
            name: name.to_string(),
            price: parse_price(prices.get(i).copied()),
            order_index: rows.len() as i64,
        });
    }
    rows
}

/// Validate a submitted group name: non-empty after trimming.
pub fn validate_group_name(name: &str) -> Result<&str, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Group name is required".to_string(),
        ));
    }
    Ok(name)
}
