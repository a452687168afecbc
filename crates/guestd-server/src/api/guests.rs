// ABOUTME: Guest CRUD handlers: list, create, fetch, update, and soft delete.
// ABOUTME: Each handler is parse -> sanitize -> one or two store calls -> envelope.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use guestd_core::{Guest, GuestDraft, sanitize};
use ulid::Ulid;

use crate::api::response::{ApiError, ApiJson, Envelope, store_err};
use crate::app_state::SharedState;

fn parse_id(raw: &str) -> Result<Ulid, ApiError> {
    raw.parse::<Ulid>().map_err(|_| ApiError::InvalidId)
}

/// GET /guests - List all active guests. Soft-deleted records are invisible.
pub async fn list_guests(
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<Guest>>>, ApiError> {
    let store = state.store.lock().await;
    let guests = store
        .list_active()
        .map_err(store_err("failed to fetch guests"))?;
    Ok(Envelope::ok(guests))
}

/// POST /guests - Create a guest from the submitted fields.
/// The payload's status is ignored; a new guest always starts active.
pub async fn create_guest(
    State(state): State<SharedState>,
    ApiJson(mut draft): ApiJson<GuestDraft>,
) -> Result<(StatusCode, Json<Envelope<Guest>>), ApiError> {
    sanitize(&mut draft)?;
    let guest = Guest::new(draft);

    let store = state.store.lock().await;
    store
        .insert(&guest)
        .map_err(store_err("failed to create guest record"))?;

    Ok((StatusCode::CREATED, Envelope::ok(guest)))
}

/// GET /guests/{id} - Fetch a single guest by id, deleted or not.
pub async fn get_guest(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Guest>>, ApiError> {
    let id = parse_id(&id)?;

    let store = state.store.lock().await;
    let guest = store
        .get(&id)
        .map_err(store_err("failed to fetch guest record"))?;
    Ok(Envelope::ok(guest))
}

/// PUT /guests/{id} - Replace every mutable field of an existing guest.
/// Fetch-then-save, not transactional: concurrent writers are last-write-wins.
pub async fn update_guest(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ApiJson(mut draft): ApiJson<GuestDraft>,
) -> Result<Json<Envelope<Guest>>, ApiError> {
    let id = parse_id(&id)?;
    sanitize(&mut draft)?;

    let store = state.store.lock().await;
    let mut guest = store
        .get(&id)
        .map_err(store_err("failed to fetch guest record"))?;

    guest.apply(draft);
    store
        .update(&guest)
        .map_err(store_err("failed to update guest record"))?;

    Ok(Envelope::ok(guest))
}

/// DELETE /guests/{id} - Soft-delete a guest and return the marked record.
pub async fn delete_guest(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Guest>>, ApiError> {
    let id = parse_id(&id)?;

    let store = state.store.lock().await;
    store
        .get(&id)
        .map_err(store_err("failed to fetch guest record"))?;

    store
        .soft_delete(&id, Utc::now())
        .map_err(store_err("failed to delete guest record"))?;

    // Re-read so the response reflects the flipped status and deleted_at
    let guest = store
        .get(&id)
        .map_err(store_err("failed to fetch guest record"))?;
    Ok(Envelope::ok(guest))
}
