//! Wiring for the Atrium server binary: configuration, store selection,
//! and the background limiter sweeper.

pub mod backend;
pub mod config;

use std::{sync::Arc, time::Duration};

use atrium_api::AppState;
use atrium_core::{gateway::SubmissionGateway, rate_limit::RateLimiter, telemetry::EventLog};
use axum::Router;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

pub use backend::{Backend, BackendError};
pub use config::ServerConfig;

/// Assemble the application state from `cfg` and an already-opened store.
pub fn build_state(
  cfg: &ServerConfig,
  store: Option<Backend>,
  limiter: Arc<RateLimiter>,
) -> AppState<Backend> {
  if cfg.auth().is_none() {
    tracing::warn!("admin credentials not set; admin routes are closed");
  }
  AppState {
    gateway: SubmissionGateway::new(store.map(Arc::new), limiter)
      .with_policy(cfg.rate_limit_policy()),
    events:  Arc::new(EventLog::new()),
    auth:    cfg.auth().map(Arc::new),
  }
}

/// The full router, with request tracing.
pub fn app(state: AppState<Backend>) -> Router {
  atrium_api::api_router(state).layer(TraceLayer::new_for_http())
}

/// Periodically drop limiter keys with no attempts left in their window.
pub fn spawn_sweeper(limiter: Arc<RateLimiter>, every: Duration) -> JoinHandle<()> {
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(every);
    // The first tick completes immediately.
    ticker.tick().await;
    loop {
      ticker.tick().await;
      let dropped = limiter.sweep();
      if dropped > 0 {
        tracing::debug!(dropped, remaining = limiter.len(), "rate limiter swept");
      }
    }
  })
}
