//! Handlers for the `/groups` resource.
//!
//! Create and edit accept the urlencoded submission produced by the
//! group configuration forms. Both run the same field extraction and
//! validation, then hand a full replacement set to the repository, which
//! persists it in one transaction.

use axum::extract::{Path, RawForm, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use menuconf_core::error::CoreError;
use menuconf_core::group::{
    collect_child_rows, parse_count, parse_price, validate_group_name, GroupKind, PricingMethod,
    SelectionPolicy, DEFAULT_MAX_PREF, DEFAULT_MIN_PREF,
};
use menuconf_core::rules::plan_rules;
use menuconf_core::types::DbId;
use menuconf_db::models::group::{GroupDetail, NewChildren, NewGroup};
use menuconf_db::models::matrix::{dense_matrix, MatrixRow};
use menuconf_db::repositories::GroupRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::form::FormFields;
use crate::response::DataResponse;
use crate::state::AppState;

/// Choices and defaults for rendering an empty creation form.
#[derive(Debug, Serialize)]
pub struct GroupFormMeta {
    pub kinds: Vec<&'static str>,
    pub group_options: Vec<&'static str>,
    pub pricing_methods: Vec<&'static str>,
    pub min_pref: i64,
    pub max_pref: i64,
    pub group_price: f64,
}

/// Edit-view payload: the group with children plus the dense rule matrix.
#[derive(Debug, Serialize)]
pub struct EditGroupView {
    #[serde(flatten)]
    pub detail: GroupDetail,
    pub rules_matrix: Vec<MatrixRow>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/groups
///
/// List all groups, newest first, with children eagerly loaded so the
/// caller can render counts and summaries without further requests.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let groups = GroupRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/groups/new
///
/// Field choices and defaults for an empty creation form.
pub async fn new_form() -> Json<DataResponse<GroupFormMeta>> {
    Json(DataResponse {
        data: GroupFormMeta {
            kinds: vec![
                GroupKind::Independent.as_str(),
                GroupKind::Dependent.as_str(),
            ],
            group_options: vec![
                SelectionPolicy::Optional.as_str(),
                SelectionPolicy::Required.as_str(),
                SelectionPolicy::Multiple.as_str(),
                SelectionPolicy::NotApplicable.as_str(),
            ],
            pricing_methods: vec![
                PricingMethod::NoCharge.as_str(),
                PricingMethod::GroupPricing.as_str(),
                PricingMethod::IndividualPricing.as_str(),
            ],
            min_pref: DEFAULT_MIN_PREF,
            max_pref: DEFAULT_MAX_PREF,
            group_price: 0.0,
        },
    })
}

/// POST /api/v1/groups
///
/// Create a group with its full child set from a form submission.
pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> AppResult<impl IntoResponse> {
    let form = FormFields::parse(&body)?;
    let (input, children) = parse_submission(&form)?;

    let group = GroupRepo::create(&state.pool, &input, &children).await?;
    // A concurrent delete can remove the row between the insert and this
    // re-read; that is not a client error.
    let detail = GroupRepo::find_detail(&state.pool, group.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("group {} vanished after create", group.id))
        })?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/groups/{id}/edit
///
/// The group with dense child lists and the reconstructed rule matrix.
pub async fn edit_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = GroupRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PreferenceGroup",
            id,
        }))?;

    let rules_matrix = dense_matrix(&detail.ingredients, &detail.columns, &detail.rules);
    Ok(Json(DataResponse {
        data: EditGroupView {
            detail,
            rules_matrix,
        },
    }))
}

/// POST /api/v1/groups/{id}/edit
///
/// Full-replacement update with the same field set as create.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RawForm(body): RawForm,
) -> AppResult<impl IntoResponse> {
    let form = FormFields::parse(&body)?;
    let (input, children) = parse_submission(&form)?;

    GroupRepo::update(&state.pool, id, &input, &children)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PreferenceGroup",
            id,
        }))?;

    let detail = GroupRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("group {id} vanished after update")))?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/groups/{id}/delete
///
/// Cascading delete of the group and all of its children.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GroupRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "PreferenceGroup",
            id,
        }))
    }
}

/// Any non-POST /api/v1/groups/{id}/delete
///
/// Deletes happen via POST only; everything else is a no-op redirect to
/// the list.
pub async fn delete_redirect() -> Redirect {
    Redirect::to("/api/v1/groups")
}

// ---------------------------------------------------------------------------
// Form extraction
// ---------------------------------------------------------------------------

/// Extract and validate a group submission.
///
/// Shared by create and update; edits are full replacements, so both
/// need the identical field set. Validation failures surface before any
/// repository call, so a rejected submission never persists a partial
/// group.
fn parse_submission(form: &FormFields) -> Result<(NewGroup, NewChildren), AppError> {
    let name = validate_group_name(form.get("name").unwrap_or(""))?;
    let kind = GroupKind::from_str(form.get("type").map(str::trim).unwrap_or(""))?;

    // The selection policy only applies to option lists; matrix groups
    // are forced to N/A no matter what was submitted.
    let group_option = match kind {
        GroupKind::Dependent => SelectionPolicy::NotApplicable,
        GroupKind::Independent => {
            SelectionPolicy::from_form_value(form.get("group_option").unwrap_or(""))?
        }
    };

    let input = NewGroup {
        name: name.to_string(),
        kind,
        group_option,
        min_pref: parse_count(form.get("minPref"), DEFAULT_MIN_PREF),
        max_pref: parse_count(form.get("maxPref"), DEFAULT_MAX_PREF),
        pricing_method: PricingMethod::from_form_value(form.get("pricingMethod").unwrap_or(""))?,
        group_price: parse_price(form.get("groupPrice")),
        multiple_selection: form.has("multiple_selection"),
        row_label: form.get("rowName").unwrap_or("").to_string(),
        column_label: form.get("columnName").unwrap_or("").to_string(),
    };

    let children = match kind {
        GroupKind::Independent => {
            let rows =
                collect_child_rows(&form.list("preferences[]"), &form.list("prices[]"));
            if rows.is_empty() {
                return Err(CoreError::Validation(
                    "At least one preference is required for Independent groups".to_string(),
                )
                .into());
            }
            NewChildren::Independent(rows)
        }
        GroupKind::Dependent => {
            let ingredients = collect_child_rows(
                &form.list("ingredients[]"),
                &form.list("ingredients_price[]"),
            );
            let columns =
                collect_child_rows(&form.list("columns[]"), &form.list("columns_price[]"));
            if ingredients.is_empty() || columns.is_empty() {
                return Err(CoreError::Validation(
                    "Dependent groups require at least one ingredient and one column"
                        .to_string(),
                )
                .into());
            }
            let rules = plan_rules(form.get("rules_json"), ingredients.len(), columns.len());
            NewChildren::Dependent {
                ingredients,
                columns,
                rules,
            }
        }
    };

    Ok((input, children))
}
