//! Error types for `atrium-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown submission status: {0:?}")]
  UnknownStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a contact-form submission can fail.
///
/// Each variant maps to exactly one caller-visible outcome; none of them are
/// fatal to the process.
#[derive(Debug, Error)]
pub enum SubmissionError {
  /// The attempt cap for the rate-limit window was reached. Recoverable by
  /// waiting.
  #[error("rate limited")]
  RateLimited,

  /// One or more field rules were violated. Carries every violated rule in
  /// declaration order (name, email, message).
  #[error("{}", .0.join(", "))]
  InvalidInput(Vec<String>),

  /// No store is configured. Only an operator can fix this.
  #[error("store unavailable")]
  StoreUnavailable,

  /// The store was reachable but the write failed.
  #[error("persistence failure: {0}")]
  PersistenceFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SubmissionError {
  /// The message shown to the person filling in the form.
  pub fn user_message(&self) -> String {
    match self {
      Self::RateLimited => {
        "Too many submissions. Please wait before trying again.".to_owned()
      }
      Self::InvalidInput(errors) => errors.join(", "),
      Self::StoreUnavailable => "Database not configured. Please set up the \
                                 database to enable contact form submissions."
        .to_owned(),
      Self::PersistenceFailure(_) => {
        "Failed to submit contact form. Please try again later.".to_owned()
      }
    }
  }

  /// Short machine-readable tag, used in telemetry and logs.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::RateLimited => "rate_limited",
      Self::InvalidInput(_) => "invalid_input",
      Self::StoreUnavailable => "store_unavailable",
      Self::PersistenceFailure(_) => "persistence_failure",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_input_joins_messages() {
    let err = SubmissionError::InvalidInput(vec![
      "Name is required".into(),
      "Email is required".into(),
    ]);
    assert_eq!(err.to_string(), "Name is required, Email is required");
    assert_eq!(err.user_message(), "Name is required, Email is required");
    assert_eq!(err.kind(), "invalid_input");
  }

  #[test]
  fn persistence_failure_keeps_source() {
    let source = std::io::Error::other("disk full");
    let err = SubmissionError::PersistenceFailure(Box::new(source));
    assert!(std::error::Error::source(&err).is_some());
    assert!(!err.user_message().contains("disk full"));
  }
}
