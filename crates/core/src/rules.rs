//! Rule planning for Dependent groups.
//!
//! The client may attach a `rules_json` payload to a submission: a JSON
//! array of sparse entries addressing matrix cells by the zero-based
//! position of the ingredient and column in the just-submitted lists.
//! [`plan_rules`] turns that payload into the concrete set of rules to
//! persist, falling back to an all-false cross product when no usable
//! payload was supplied.

use serde_json::Value;

/// The four per-cell booleans on a matrix rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleFlags {
    pub show: bool,
    pub is_default: bool,
    pub required: bool,
    pub allow_more: bool,
}

/// One rule to persist, addressed by list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRule {
    pub ingredient_index: usize,
    pub column_index: usize,
    pub flags: RuleFlags,
}

/// Derive the rule set for a Dependent group from an optional sparse
/// payload and the sizes of the created ingredient/column lists.
///
/// Fallback: an absent payload, a payload that fails to parse as a JSON
/// array, or a parsed-but-empty array all produce the full ingredient x
/// column cross product with every flag false, so each cell carries an
/// explicit "closed" rule.
///
/// Otherwise each entry with both indices present and in bounds yields
/// one rule; entries with missing or out-of-bounds indices are skipped
/// silently, and no fallback fires even if every entry was skipped.
pub fn plan_rules(
    payload: Option<&str>,
    ingredient_count: usize,
    column_count: usize,
) -> Vec<CellRule> {
    let entries = match payload.map(serde_json::from_str::<Vec<Value>>) {
        Some(Ok(entries)) if !entries.is_empty() => entries,
        // Absent, unparseable, or empty: every cell gets a closed rule.
        _ => return cross_product(ingredient_count, column_count),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let ingredient_index = index_field(entry, "ingredient_index")?;
            let column_index = index_field(entry, "column_index")?;
            if ingredient_index >= ingredient_count || column_index >= column_count {
                return None;
            }
            Some(CellRule {
                ingredient_index,
                column_index,
                flags: RuleFlags {
                    show: flag_field(entry, "show"),
                    is_default: flag_field(entry, "default"),
                    required: flag_field(entry, "required"),
                    allow_more: flag_field(entry, "allow_more"),
                },
            })
        })
        .collect()
}

/// The all-false cross product used when no explicit rules were supplied.
fn cross_product(ingredient_count: usize, column_count: usize) -> Vec<CellRule> {
    let mut rules = Vec::with_capacity(ingredient_count * column_count);
    for ingredient_index in 0..ingredient_count {
        for column_index in 0..column_count {
            rules.push(CellRule {
                ingredient_index,
                column_index,
                flags: RuleFlags::default(),
            });
        }
    }
    rules
}

/// Read a non-negative integer index from an entry, if present.
fn index_field(entry: &Value, key: &str) -> Option<usize> {
    entry
        .get(key)
        .and_then(Value::as_i64)
        .and_then(|i| usize::try_from(i).ok())
}

/// Coerce a submitted flag value to a boolean. Absent means false;
/// non-boolean values use truthiness (non-zero number, non-empty string).
fn flag_field(entry: &Value, key: &str) -> bool {
    match entry.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_payload_yields_cross_product() {
        let rules = plan_rules(None, 2, 3);
        assert_eq!(rules.len(), 6);
        assert!(rules.iter().all(|r| r.flags == RuleFlags::default()));
        // Row-major: every (i, c) pair appears exactly once.
        assert_eq!(rules[0].ingredient_index, 0);
        assert_eq!(rules[0].column_index, 0);
        assert_eq!(rules[5].ingredient_index, 1);
        assert_eq!(rules[5].column_index, 2);
    }

    #[test]
    fn unparseable_payload_yields_cross_product() {
        assert_eq!(plan_rules(Some("not json"), 2, 2).len(), 4);
        assert_eq!(plan_rules(Some("{\"a\":1}"), 2, 2).len(), 4);
    }

    #[test]
    fn empty_array_yields_cross_product() {
        assert_eq!(plan_rules(Some("[]"), 3, 2).len(), 6);
    }

    #[test]
    fn sparse_entries_become_rules() {
        let payload = r#"[
            {"ingredient_index": 0, "column_index": 1, "show": true, "default": true},
            {"ingredient_index": 1, "column_index": 0, "required": true, "allow_more": true}
        ]"#;
        let rules = plan_rules(Some(payload), 2, 2);
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules[0],
            CellRule {
                ingredient_index: 0,
                column_index: 1,
                flags: RuleFlags {
                    show: true,
                    is_default: true,
                    required: false,
                    allow_more: false,
                },
            }
        );
        assert!(rules[1].flags.required);
        assert!(rules[1].flags.allow_more);
        assert!(!rules[1].flags.show);
    }

    #[test]
    fn out_of_bounds_and_incomplete_entries_are_skipped() {
        let payload = r#"[
            {"ingredient_index": 5, "column_index": 0, "show": true},
            {"ingredient_index": -1, "column_index": 0, "show": true},
            {"column_index": 0, "show": true},
            {"ingredient_index": 0, "column_index": 0, "show": true}
        ]"#;
        let rules = plan_rules(Some(payload), 2, 2);
        // Only the in-bounds entry survives; no fallback fires.
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].ingredient_index, 0);
        assert!(rules[0].flags.show);
    }

    #[test]
    fn all_entries_skipped_still_no_fallback() {
        let payload = r#"[{"ingredient_index": 9, "column_index": 9}]"#;
        assert!(plan_rules(Some(payload), 2, 2).is_empty());
    }

    #[test]
    fn flags_coerce_with_truthiness() {
        let payload = r#"[
            {"ingredient_index": 0, "column_index": 0,
             "show": 1, "default": 0, "required": "yes", "allow_more": ""}
        ]"#;
        let rules = plan_rules(Some(payload), 1, 1);
        assert_eq!(
            rules[0].flags,
            RuleFlags {
                show: true,
                is_default: false,
                required: true,
                allow_more: false,
            }
        );
    }
}
