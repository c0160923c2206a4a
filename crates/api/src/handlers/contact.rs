//! Handlers for the `/contacts` resource.
//!
//! Each handler runs its store work inside one transaction. Returning early
//! with an error drops the transaction, which rolls it back.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contactdesk_core::contact::{validate_contact_changes, validate_new_contact};
use contactdesk_core::error::CoreError;
use contactdesk_core::pagination::{Page, PageRequest};
use contactdesk_core::types::DbId;
use contactdesk_db::models::contact::Contact;
use contactdesk_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, JsonBody};
use crate::query::PageParams;
use crate::response::StatusResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id,
    })
}

/// POST /contacts
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let input = validate_new_contact(&body, &state.config.allowed_services)?;

    let mut tx = state.pool.begin().await?;
    let contact = ContactRepo::create(&mut tx, &input)
        .await
        .map_err(AppError::from_contact_write)?;
    tx.commit().await.map_err(AppError::from_contact_write)?;

    tracing::info!(contact_id = contact.id, service = %contact.service, "Contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /contacts?page=&per_page=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<Page<Contact>>> {
    let request = PageRequest::new(params.page, params.per_page, state.config.default_per_page);

    let mut tx = contactdesk_db::begin_read_snapshot(&state.pool).await?;
    let page = ContactRepo::list(&mut tx, request).await?;
    tx.commit().await?;

    Ok(Json(page))
}

/// GET /contacts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Contact>> {
    let mut tx = state.pool.begin().await?;
    let contact = ContactRepo::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    Ok(Json(contact))
}

/// PUT /contacts/{id}
///
/// Applies only the supplied fields. An unknown id is reported before the
/// body is validated.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Contact>> {
    let mut tx = state.pool.begin().await?;

    if ContactRepo::find_by_id(&mut tx, id).await?.is_none() {
        return Err(not_found(id));
    }

    let changes = validate_contact_changes(&body, &state.config.allowed_services)?;

    let contact = ContactRepo::update(&mut tx, id, &changes)
        .await
        .map_err(AppError::from_contact_write)?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await.map_err(AppError::from_contact_write)?;

    tracing::info!(contact_id = id, "Contact updated");
    Ok(Json(contact))
}

/// DELETE /contacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<StatusResponse>> {
    let mut tx = state.pool.begin().await?;
    let deleted = ContactRepo::delete(&mut tx, id).await?;
    if !deleted {
        return Err(not_found(id));
    }
    tx.commit().await?;

    tracing::info!(contact_id = id, "Contact deleted");
    Ok(Json(StatusResponse::DELETED))
}
