//! JSON HTTP API for the Atrium site.
//!
//! Exposes an axum [`Router`] backed by any [`DataStore`]. TLS and transport
//! concerns are the caller's responsibility.
//!
//! | Method  | Path | Auth |
//! |---------|------|------|
//! | `POST`  | `/contact` | none |
//! | `GET`   | `/submissions` | admin |
//! | `GET`   | `/services` | none |
//! | `POST`  | `/services` | admin |
//! | `PATCH` | `/services/{id}` | admin |
//! | `POST`  | `/services/{id}/view` | none |
//! | `GET`   | `/health` | none |
//! | `GET`   | `/events` | admin |

pub mod auth;
pub mod contact;
pub mod error;
pub mod events;
pub mod health;
pub mod services;
pub mod submissions;

use std::sync::Arc;

use atrium_core::{gateway::SubmissionGateway, store::DataStore, telemetry::EventLog};
use axum::{
  Router,
  routing::{get, patch, post},
};

pub use auth::AuthConfig;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub gateway: SubmissionGateway<S>,
  pub events:  Arc<EventLog>,
  /// Admin credentials; `None` keeps the admin routes closed.
  pub auth:    Option<Arc<AuthConfig>>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      gateway: self.gateway.clone(),
      events:  Arc::clone(&self.events),
      auth:    self.auth.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: DataStore + 'static,
{
  Router::new()
    .route("/contact", post(contact::submit::<S>))
    .route("/submissions", get(submissions::list::<S>))
    .route("/services", get(services::list::<S>).post(services::create::<S>))
    .route("/services/{id}", patch(services::update::<S>))
    .route("/services/{id}/view", post(services::view::<S>))
    .route("/health", get(health::handler::<S>))
    .route("/events", get(events::list::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
