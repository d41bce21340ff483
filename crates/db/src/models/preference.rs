//! Selectable option rows for Independent groups.

use menuconf_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `preferences` table: one selectable option within an
/// Independent group, ordered by `order_index`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Preference {
    pub id: DbId,
    pub group_id: DbId,
    pub name: String,
    pub price: f64,
    pub order_index: i64,
}
