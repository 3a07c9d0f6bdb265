//! HTTP Basic-auth guard for the admin endpoints.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use atrium_core::store::DataStore;
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};

use crate::{AppState, error::ApiError};

/// Credentials accepted for admin requests.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Zero-size marker: present in the handler means the caller is an admin.
pub struct Admin;

/// Verify Basic credentials in `headers` against `config`.
///
/// With no config every request is rejected, so admin routes stay closed
/// until credentials are set.
pub fn verify_auth(headers: &HeaderMap, config: Option<&AuthConfig>) -> Result<(), ApiError> {
  let config = config.ok_or(ApiError::Unauthorized)?;

  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  if username != config.username {
    tracing::debug!(username, "admin auth: unknown user");
    return Err(ApiError::Unauthorized);
  }

  let parsed_hash = PasswordHash::new(&config.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(())
}

impl<S> FromRequestParts<AppState<S>> for Admin
where
  S: DataStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_auth(&parts.headers, state.auth.as_deref())?;
    Ok(Admin)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use argon2::{PasswordHasher, password_hash::SaltString};
  use atrium_core::{
    gateway::SubmissionGateway, rate_limit::RateLimiter, telemetry::EventLog,
  };
  use atrium_store_sqlite::SqliteStore;
  use axum::http::{Request, header};
  use rand_core::OsRng;

  use super::*;

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  fn make_state(auth: Option<AuthConfig>) -> AppState<SqliteStore> {
    AppState {
      gateway: SubmissionGateway::new(None, Arc::new(RateLimiter::new())),
      events:  Arc::new(EventLog::new()),
      auth:    auth.map(Arc::new),
    }
  }

  fn with_password(password: &str) -> AppState<SqliteStore> {
    make_state(Some(AuthConfig {
      username:      "admin".to_string(),
      password_hash: hash(password),
    }))
  }

  async fn extract(req: Request<axum::body::Body>, state: &AppState<SqliteStore>) -> Result<Admin, ApiError> {
    let (mut parts, _) = req.into_parts();
    Admin::from_request_parts(&mut parts, state).await
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[tokio::test]
  async fn correct_credentials() {
    let state = with_password("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("admin", "secret"))
      .body(axum::body::Body::empty()).unwrap();
    assert!(extract(req, &state).await.is_ok());
  }

  #[tokio::test]
  async fn wrong_password() {
    let state = with_password("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("admin", "wrong"))
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn wrong_user() {
    let state = with_password("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("root", "secret"))
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn missing_header() {
    let state = with_password("secret");
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn invalid_base64() {
    let state = with_password("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn unconfigured_admin_rejects_everyone() {
    let state = make_state(None);
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("admin", "secret"))
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }
}
