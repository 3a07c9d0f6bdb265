//! Handlers for `/services` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/services` | Active services; built-in list when no store is configured |
//! | `POST`  | `/services` | Admin. Body: [`NewService`]; returns 201 + stored service |
//! | `PATCH` | `/services/{id}` | Admin. Body: [`ServicePatch`]; 404 if not found |
//! | `POST`  | `/services/{id}/view` | Records a `service_view` event |

use atrium_core::{
  service::{NewService, Service, ServicePatch, fallback_services},
  store::DataStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use uuid::Uuid;

use crate::{AppState, auth::Admin, error::ApiError};

async fn active_services<S>(state: &AppState<S>) -> Result<Vec<Service>, ApiError>
where
  S: DataStore + 'static,
{
  match state.gateway.store() {
    Some(store) => state
      .events
      .measure_api_call("list_active_services", store.list_active_services())
      .await
      .map_err(ApiError::store),
    None => Ok(fallback_services()),
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /services`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Service>>, ApiError>
where
  S: DataStore + 'static,
{
  Ok(Json(active_services(&state).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /services`: returns 201 + the stored [`Service`].
pub async fn create<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Json(body): Json<NewService>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DataStore + 'static,
{
  if body.title.trim().is_empty() {
    return Err(ApiError::BadRequest("title is required".into()));
  }
  let store = state.gateway.store().ok_or(ApiError::StoreUnavailable)?;
  let service = state
    .events
    .measure_api_call("create_service", store.create_service(body))
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %service.id, title = %service.title, "service created");
  Ok((StatusCode::CREATED, Json(service)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /services/:id`
pub async fn update<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<ServicePatch>,
) -> Result<Json<Service>, ApiError>
where
  S: DataStore + 'static,
{
  if patch.is_empty() {
    return Err(ApiError::BadRequest("no fields to update".into()));
  }
  let store = state.gateway.store().ok_or(ApiError::StoreUnavailable)?;
  let service = state
    .events
    .measure_api_call("update_service", store.update_service(id, patch))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("service {id} not found")))?;
  Ok(Json(service))
}

// ─── View ─────────────────────────────────────────────────────────────────────

/// `POST /services/{id}/view`: 204, or 404 for an unknown or inactive service.
pub async fn view<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DataStore + 'static,
{
  let service = active_services(&state)
    .await?
    .into_iter()
    .find(|s| s.id == id)
    .ok_or_else(|| ApiError::NotFound(format!("service {id} not found")))?;
  state
    .events
    .track_service_view(&service.id.to_string(), &service.title);
  Ok(StatusCode::NO_CONTENT)
}
