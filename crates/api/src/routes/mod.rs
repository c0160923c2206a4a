pub mod contact;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contacts                list, create
/// /contacts/{id}           get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/contacts", contact::router())
}
