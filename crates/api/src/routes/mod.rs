pub mod group;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /groups                   list (GET), create (POST)
/// /groups/new               creation form metadata (GET)
/// /groups/{id}/edit         edit view with rule matrix (GET), update (POST)
/// /groups/{id}/delete       cascading delete (POST); other methods no-op redirect
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/groups", group::router())
}
