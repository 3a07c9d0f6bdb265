//! API error type and [`axum::response::IntoResponse`] implementation.

use atrium_core::SubmissionError;
use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized")]
  Unauthorized,

  /// A read or admin write needed the store but none is configured.
  #[error("store unavailable")]
  StoreUnavailable,

  #[error(transparent)]
  Submission(#[from] SubmissionError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

fn submission_status(e: &SubmissionError) -> StatusCode {
  match e {
    SubmissionError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
    SubmissionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
    SubmissionError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    SubmissionError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"atrium\""),
        );
        res
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response(),
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::StoreUnavailable => (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "Database not configured" })),
      )
        .into_response(),
      ApiError::Submission(e) => {
        let status = submission_status(&e);
        let body = match &e {
          SubmissionError::InvalidInput(errors) => {
            json!({ "error": e.user_message(), "kind": e.kind(), "errors": errors })
          }
          _ => json!({ "error": e.user_message(), "kind": e.kind() }),
        };
        (status, Json(body)).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store error");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
