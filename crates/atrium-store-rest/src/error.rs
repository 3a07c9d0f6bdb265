//! Error type for `atrium-store-rest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The service answered with a non-success status.
  #[error("{method} {table} → {status}: {message}")]
  Status {
    method:  &'static str,
    table:   &'static str,
    status:  u16,
    message: String,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A write asked for the stored row back but the response held none.
  #[error("{0} returned no rows")]
  EmptyResponse(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
