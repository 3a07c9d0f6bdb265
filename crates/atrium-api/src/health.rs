//! Handler for `GET /health`: reports whether the store is configured and
//! reachable. Always answers 200; the body carries the verdict.

use atrium_core::store::DataStore;
use axum::{Json, extract::State};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
  pub configured: bool,
  pub connected:  bool,
  pub message:    String,
}

/// `GET /health`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Json<Health>
where
  S: DataStore + 'static,
{
  let Some(store) = state.gateway.store() else {
    return Json(Health {
      configured: false,
      connected:  false,
      message:    "Database not configured".to_owned(),
    });
  };

  let health = match state.events.measure_api_call("ping", store.ping()).await {
    Ok(()) => Health {
      configured: true,
      connected:  true,
      message:    "Database connection successful".to_owned(),
    },
    Err(e) => {
      tracing::warn!(error = %e, "health check: store unreachable");
      Health {
        configured: true,
        connected:  false,
        message:    format!("Database connection failed: {e}"),
      }
    }
  };
  Json(health)
}
