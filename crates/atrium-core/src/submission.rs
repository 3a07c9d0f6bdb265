//! Contact-form submissions.
//!
//! A submission is persisted exactly once by the gateway and never mutated
//! by this crate afterwards. Status transitions happen elsewhere.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

/// Triage state of a submission.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  AsRefStr,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionStatus {
  #[default]
  New,
  InProgress,
  Resolved,
}

impl SubmissionStatus {
  pub fn as_str(&self) -> &str { self.as_ref() }

  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownStatus(s.to_owned()))
  }
}

/// Caller-supplied input for a submission, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
  pub name:    String,
  pub email:   String,
  pub message: String,
  #[serde(default)]
  pub status:  SubmissionStatus,
}

impl NewSubmission {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self {
      name:    name.into(),
      email:   email.into(),
      message: message.into(),
      status:  SubmissionStatus::New,
    }
  }
}

/// A submission as recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub id:         Uuid,
  pub name:       String,
  pub email:      String,
  pub message:    String,
  pub status:     SubmissionStatus,
  pub created_at: DateTime<Utc>,
}
