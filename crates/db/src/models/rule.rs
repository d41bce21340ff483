//! Per-cell rule entities for Dependent groups.

use menuconf_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dependent_rules` table: the relationship between one
/// ingredient and one column. At most one rule exists per pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DependentRule {
    pub id: DbId,
    pub ingredient_id: DbId,
    pub column_id: DbId,
    pub show: bool,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub required: bool,
    pub allow_more: bool,
}
