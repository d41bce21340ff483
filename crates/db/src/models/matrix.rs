//! Dense matrix reconstruction for the edit view.
//!
//! Existing rules are sparse: a (ingredient, column) pair may have no
//! rule row at all. The edit view needs a value for every cell, so
//! [`dense_matrix`] emits the full grid and fills gaps with all-false
//! flags.

use std::collections::HashMap;

use menuconf_core::types::DbId;
use serde::Serialize;

use crate::models::column::DependentColumn;
use crate::models::ingredient::DependentIngredient;
use crate::models::rule::DependentRule;

/// One cell of the reconstructed edit matrix.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixCell {
    pub column_id: DbId,
    pub column_name: String,
    pub price: f64,
    pub show: bool,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub required: bool,
    pub allow_more: bool,
}

/// One ingredient row of the reconstructed edit matrix, cells in column
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub ingredient_id: DbId,
    pub ingredient_name: String,
    pub ingredient_price: f64,
    pub cells: Vec<MatrixCell>,
}

/// Rebuild the dense ingredient x column grid from stored rows.
///
/// Output is row-major: outer rows follow ingredient order, inner cells
/// follow column order (callers pass lists already sorted by
/// `order_index`). Every cell is emitted even when no rule row exists
/// for the pair; missing rules render as all-false.
pub fn dense_matrix(
    ingredients: &[DependentIngredient],
    columns: &[DependentColumn],
    rules: &[DependentRule],
) -> Vec<MatrixRow> {
    let by_pair: HashMap<(DbId, DbId), &DependentRule> = rules
        .iter()
        .map(|rule| ((rule.ingredient_id, rule.column_id), rule))
        .collect();

    ingredients
        .iter()
        .map(|ingredient| MatrixRow {
            ingredient_id: ingredient.id,
            ingredient_name: ingredient.name.clone(),
            ingredient_price: ingredient.price,
            cells: columns
                .iter()
                .map(|column| {
                    let rule = by_pair.get(&(ingredient.id, column.id));
                    MatrixCell {
                        column_id: column.id,
                        column_name: column.name.clone(),
                        price: column.price,
                        show: rule.is_some_and(|r| r.show),
                        is_default: rule.is_some_and(|r| r.is_default),
                        required: rule.is_some_and(|r| r.required),
                        allow_more: rule.is_some_and(|r| r.allow_more),
                    }
                })
                .collect(),
        })
        .collect()
}
