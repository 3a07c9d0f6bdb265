//! Handler for `POST /contact`: the public contact form.

use atrium_core::{store::DataStore, submission::NewSubmission};
use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError};

/// JSON body of a contact-form post. Missing fields are treated as empty so
/// they surface as validation messages rather than a decode error.
#[derive(Debug, Deserialize)]
pub struct ContactBody {
  #[serde(default)]
  pub name:    String,
  #[serde(default)]
  pub email:   String,
  #[serde(default)]
  pub message: String,
}

impl From<ContactBody> for NewSubmission {
  fn from(b: ContactBody) -> Self { NewSubmission::new(b.name, b.email, b.message) }
}

/// `POST /contact`: returns 201 on success.
///
/// Every outcome is recorded in the telemetry log, including bodies that
/// fail to decode.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  payload: Result<Json<ContactBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DataStore + 'static,
{
  let raw = match payload {
    Ok(Json(body)) => NewSubmission::from(body),
    Err(rejection) => {
      let e = state.gateway.reject_malformed(rejection.body_text());
      state
        .events
        .track_contact_submission(false, Some(&e.user_message()));
      return Err(e.into());
    }
  };

  let outcome = state
    .events
    .measure_api_call("submit_contact_form", state.gateway.submit(raw))
    .await;

  match outcome {
    Ok(()) => {
      state.events.track_contact_submission(true, None);
      Ok((
        StatusCode::CREATED,
        Json(json!({
          "message": "Thank you for contacting us. We'll get back to you soon."
        })),
      ))
    }
    Err(e) => {
      state
        .events
        .track_contact_submission(false, Some(&e.user_message()));
      Err(e.into())
    }
  }
}
