//! Preference group models and DTOs.

use chrono::{DateTime, Utc};
use menuconf_core::group::{ChildRow, GroupKind, PricingMethod, SelectionPolicy};
use menuconf_core::rules::CellRule;
use menuconf_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::column::DependentColumn;
use crate::models::ingredient::DependentIngredient;
use crate::models::preference::Preference;
use crate::models::rule::DependentRule;

/// A row from the `preference_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PreferenceGroup {
    pub id: DbId,
    pub name: String,
    /// `Independent` or `Dependent`.
    pub kind: String,
    /// Selection policy: `optional`, `required`, `multiple`, or `N/A`.
    pub group_option: String,
    pub min_pref: i64,
    pub max_pref: i64,
    pub pricing_method: String,
    pub group_price: f64,
    pub multiple_selection: bool,
    /// Display label for the matrix row axis.
    pub row_label: String,
    /// Display label for the matrix column axis.
    pub column_label: String,
    pub created_at: DateTime<Utc>,
}

/// Scalar fields for creating or fully updating a group.
///
/// Built by the API layer from validated form fields; create and update
/// share this shape because edits are full replacements.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub kind: GroupKind,
    pub group_option: SelectionPolicy,
    pub min_pref: i64,
    pub max_pref: i64,
    pub pricing_method: PricingMethod,
    pub group_price: f64,
    pub multiple_selection: bool,
    pub row_label: String,
    pub column_label: String,
}

/// The replacement child set accompanying a create or update.
///
/// Carries only the children matching the submitted kind; the repository
/// discards whatever else the group owned.
#[derive(Debug, Clone)]
pub enum NewChildren {
    Independent(Vec<ChildRow>),
    Dependent {
        ingredients: Vec<ChildRow>,
        columns: Vec<ChildRow>,
        rules: Vec<CellRule>,
    },
}

/// A group with every child collection eagerly loaded.
///
/// Lets the presentation side render counts and summaries without
/// issuing further queries.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    pub group: PreferenceGroup,
    pub preferences: Vec<Preference>,
    pub ingredients: Vec<DependentIngredient>,
    pub columns: Vec<DependentColumn>,
    pub rules: Vec<DependentRule>,
}
