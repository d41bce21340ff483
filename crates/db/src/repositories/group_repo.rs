//! Repository for preference groups and their child collections.
//!
//! Creates and edits are full replacements executed in one transaction:
//! either the group row and its entire child set land together, or
//! nothing does. Validation of submitted fields happens in the API layer
//! before this repository is called.

use std::collections::HashMap;

use chrono::Utc;
use menuconf_core::group::ChildRow;
use menuconf_core::types::DbId;
use sqlx::Sqlite;

use crate::models::column::DependentColumn;
use crate::models::group::{GroupDetail, NewChildren, NewGroup, PreferenceGroup};
use crate::models::ingredient::DependentIngredient;
use crate::models::preference::Preference;
use crate::models::rule::DependentRule;
use crate::DbPool;

/// Column list for the `preference_groups` table.
const GROUP_COLUMNS: &str = "id, name, kind, group_option, min_pref, max_pref, \
    pricing_method, group_price, multiple_selection, row_label, column_label, created_at";

/// Column list shared by the three child tables.
const CHILD_COLUMNS: &str = "id, group_id, name, price, order_index";

/// Column list for the `dependent_rules` table.
const RULE_COLUMNS: &str = "id, ingredient_id, column_id, show, is_default, required, allow_more";

/// Provides CRUD operations for preference groups with transactional
/// full-replacement child handling.
pub struct GroupRepo;

impl GroupRepo {
    /// List all groups, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<PreferenceGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {GROUP_COLUMNS} FROM preference_groups \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PreferenceGroup>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all groups with every child collection eagerly loaded.
    ///
    /// Uses one query per table (five total) rather than one per group,
    /// then buckets rows in memory, so listing cost stays bounded.
    pub async fn list_detailed(pool: &DbPool) -> Result<Vec<GroupDetail>, sqlx::Error> {
        let groups = Self::list(pool).await?;

        let preferences_query =
            format!("SELECT {CHILD_COLUMNS} FROM preferences ORDER BY group_id, order_index");
        let preferences = sqlx::query_as::<_, Preference>(&preferences_query)
            .fetch_all(pool)
            .await?;

        let ingredients_query = format!(
            "SELECT {CHILD_COLUMNS} FROM dependent_ingredients ORDER BY group_id, order_index"
        );
        let ingredients = sqlx::query_as::<_, DependentIngredient>(&ingredients_query)
            .fetch_all(pool)
            .await?;

        let columns_query = format!(
            "SELECT {CHILD_COLUMNS} FROM dependent_columns ORDER BY group_id, order_index"
        );
        let columns = sqlx::query_as::<_, DependentColumn>(&columns_query)
            .fetch_all(pool)
            .await?;

        let rules_query = format!("SELECT {RULE_COLUMNS} FROM dependent_rules ORDER BY id");
        let rules = sqlx::query_as::<_, DependentRule>(&rules_query)
            .fetch_all(pool)
            .await?;

        // Rules carry no group_id; attribute them through their ingredient.
        let ingredient_group: HashMap<DbId, DbId> =
            ingredients.iter().map(|i| (i.id, i.group_id)).collect();

        let mut position: HashMap<DbId, usize> = HashMap::new();
        let mut details: Vec<GroupDetail> = groups
            .into_iter()
            .enumerate()
            .map(|(idx, group)| {
                position.insert(group.id, idx);
                GroupDetail {
                    group,
                    preferences: Vec::new(),
                    ingredients: Vec::new(),
                    columns: Vec::new(),
                    rules: Vec::new(),
                }
            })
            .collect();

        for preference in preferences {
            if let Some(&idx) = position.get(&preference.group_id) {
                details[idx].preferences.push(preference);
            }
        }
        for ingredient in ingredients {
            if let Some(&idx) = position.get(&ingredient.group_id) {
                details[idx].ingredients.push(ingredient);
            }
        }
        for column in columns {
            if let Some(&idx) = position.get(&column.group_id) {
                details[idx].columns.push(column);
            }
        }
        for rule in rules {
            if let Some(&idx) = ingredient_group
                .get(&rule.ingredient_id)
                .and_then(|group_id| position.get(group_id))
            {
                details[idx].rules.push(rule);
            }
        }

        Ok(details)
    }

    /// Find one group by id.
    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<PreferenceGroup>, sqlx::Error> {
        let query = format!("SELECT {GROUP_COLUMNS} FROM preference_groups WHERE id = ?");
        sqlx::query_as::<_, PreferenceGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find one group by id with every child collection loaded.
    pub async fn find_detail(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<GroupDetail>, sqlx::Error> {
        let Some(group) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let preferences_query = format!(
            "SELECT {CHILD_COLUMNS} FROM preferences WHERE group_id = ? ORDER BY order_index"
        );
        let preferences = sqlx::query_as::<_, Preference>(&preferences_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let ingredients_query = format!(
            "SELECT {CHILD_COLUMNS} FROM dependent_ingredients \
             WHERE group_id = ? ORDER BY order_index"
        );
        let ingredients = sqlx::query_as::<_, DependentIngredient>(&ingredients_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let columns_query = format!(
            "SELECT {CHILD_COLUMNS} FROM dependent_columns \
             WHERE group_id = ? ORDER BY order_index"
        );
        let columns = sqlx::query_as::<_, DependentColumn>(&columns_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let rules_query = format!(
            "SELECT r.id, r.ingredient_id, r.column_id, r.show, r.is_default, \
                    r.required, r.allow_more \
             FROM dependent_rules r \
             JOIN dependent_ingredients i ON i.id = r.ingredient_id \
             WHERE i.group_id = ? \
             ORDER BY r.id"
        );
        let rules = sqlx::query_as::<_, DependentRule>(&rules_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(GroupDetail {
            group,
            preferences,
            ingredients,
            columns,
            rules,
        }))
    }

    /// Insert a new group with its full child set in one transaction.
    pub async fn create(
        pool: &DbPool,
        input: &NewGroup,
        children: &NewChildren,
    ) -> Result<PreferenceGroup, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO preference_groups \
                (name, kind, group_option, min_pref, max_pref, pricing_method, \
                 group_price, multiple_selection, row_label, column_label, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {GROUP_COLUMNS}"
        );
        let group = sqlx::query_as::<_, PreferenceGroup>(&insert_query)
            .bind(&input.name)
            .bind(input.kind.as_str())
            .bind(input.group_option.as_str())
            .bind(input.min_pref)
            .bind(input.max_pref)
            .bind(input.pricing_method.as_str())
            .bind(input.group_price)
            .bind(input.multiple_selection)
            .bind(&input.row_label)
            .bind(&input.column_label)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_children(&mut tx, group.id, children).await?;

        tx.commit().await?;
        tracing::debug!(group_id = group.id, name = %group.name, "Created preference group");
        Ok(group)
    }

    /// Update a group's scalar fields and replace its children wholesale.
    ///
    /// Existing children of BOTH kinds are discarded before the new set
    /// is inserted, so switching kind never leaves orphaned rows behind.
    /// Returns `None` (and commits nothing) if the id does not exist.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &NewGroup,
        children: &NewChildren,
    ) -> Result<Option<PreferenceGroup>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE preference_groups SET \
                name = ?, kind = ?, group_option = ?, min_pref = ?, max_pref = ?, \
                pricing_method = ?, group_price = ?, multiple_selection = ?, \
                row_label = ?, column_label = ? \
             WHERE id = ? \
             RETURNING {GROUP_COLUMNS}"
        );
        let group = sqlx::query_as::<_, PreferenceGroup>(&update_query)
            .bind(&input.name)
            .bind(input.kind.as_str())
            .bind(input.group_option.as_str())
            .bind(input.min_pref)
            .bind(input.max_pref)
            .bind(input.pricing_method.as_str())
            .bind(input.group_price)
            .bind(input.multiple_selection)
            .bind(&input.row_label)
            .bind(&input.column_label)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(group) = group else {
            // Dropping the transaction rolls it back.
            return Ok(None);
        };

        sqlx::query("DELETE FROM preferences WHERE group_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        // Rules cascade with their ingredients.
        sqlx::query("DELETE FROM dependent_ingredients WHERE group_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM dependent_columns WHERE group_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_children(&mut tx, id, children).await?;

        tx.commit().await?;
        tracing::debug!(group_id = id, "Replaced preference group");
        Ok(Some(group))
    }

    /// Delete a group; children go with it via cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM preference_groups WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert the child set for a group within an existing transaction.
    async fn insert_children(
        tx: &mut sqlx::Transaction<'_, Sqlite>,
        group_id: DbId,
        children: &NewChildren,
    ) -> Result<(), sqlx::Error> {
        match children {
            NewChildren::Independent(rows) => {
                Self::insert_child_rows(tx, "preferences", group_id, rows).await?;
            }
            NewChildren::Dependent {
                ingredients,
                columns,
                rules,
            } => {
                let ingredient_ids =
                    Self::insert_child_rows(tx, "dependent_ingredients", group_id, ingredients)
                        .await?;
                let column_ids =
                    Self::insert_child_rows(tx, "dependent_columns", group_id, columns).await?;

                // Rule indices were planned against these same lists, so
                // they are in bounds by construction.
                for rule in rules {
                    sqlx::query(
                        "INSERT INTO dependent_rules \
                            (ingredient_id, column_id, show, is_default, required, allow_more) \
                         VALUES (?, ?, ?, ?, ?, ?)",
                    )
                    .bind(ingredient_ids[rule.ingredient_index])
                    .bind(column_ids[rule.column_index])
                    .bind(rule.flags.show)
                    .bind(rule.flags.is_default)
                    .bind(rule.flags.required)
                    .bind(rule.flags.allow_more)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }
        Ok(())
    }

    /// Insert ordered child rows into one of the three child tables,
    /// returning the new ids in insertion order.
    async fn insert_child_rows(
        tx: &mut sqlx::Transaction<'_, Sqlite>,
        table: &str,
        group_id: DbId,
        rows: &[ChildRow],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (group_id, name, price, order_index) \
             VALUES (?, ?, ?, ?) \
             RETURNING id"
        );
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id: DbId = sqlx::query_scalar(&query)
                .bind(group_id)
                .bind(&row.name)
                .bind(row.price)
                .bind(row.order_index)
                .fetch_one(&mut **tx)
                .await?;
            ids.push(id);
        }
        Ok(ids)
    }
}
