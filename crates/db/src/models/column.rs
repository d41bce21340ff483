//! Matrix column entities for Dependent groups.

use menuconf_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dependent_columns` table: one column of a Dependent
/// group's rule matrix.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DependentColumn {
    pub id: DbId,
    pub group_id: DbId,
    pub name: String,
    pub price: f64,
    pub order_index: i64,
}
