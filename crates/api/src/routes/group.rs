//! Route definitions for preference groups.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::group;
use crate::state::AppState;

/// Routes mounted at `/groups`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /new              -> new_form
/// GET    /{id}/edit        -> edit_view
/// POST   /{id}/edit        -> update
/// POST   /{id}/delete      -> delete
/// *      /{id}/delete      -> delete_redirect (no-op)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(group::list).post(group::create))
        .route("/new", get(group::new_form))
        .route("/{id}/edit", get(group::edit_view).post(group::update))
        // Deletes happen via POST only; every other method is a no-op
        // redirect back to the list.
        .route(
            "/{id}/delete",
            post(group::delete).fallback(group::delete_redirect),
        )
}
