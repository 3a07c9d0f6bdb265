//! Handler for `GET /submissions` (admin).

use atrium_core::{store::DataStore, submission::Submission};
use axum::{Json, extract::State};

use crate::{AppState, auth::Admin, error::ApiError};

/// `GET /submissions`: newest first.
pub async fn list<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Submission>>, ApiError>
where
  S: DataStore + 'static,
{
  let store = state.gateway.store().ok_or(ApiError::StoreUnavailable)?;
  let submissions = state
    .events
    .measure_api_call("list_submissions", store.list_submissions())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(submissions))
}
