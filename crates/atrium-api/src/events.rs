//! Handler for `GET /events` (admin): the retained telemetry log.

use atrium_core::{store::DataStore, telemetry::Event};
use axum::{Json, extract::State};

use crate::{AppState, auth::Admin};

/// `GET /events`: oldest first.
pub async fn list<S>(_admin: Admin, State(state): State<AppState<S>>) -> Json<Vec<Event>>
where
  S: DataStore + 'static,
{
  Json(state.events.events())
}
