//! The contact-form write path.
//!
//! [`SubmissionGateway::submit`] runs, in order: rate-limit check,
//! validation, sanitization, persistence. The first failing step decides the
//! [`SubmissionError`]; later steps do not run. Nothing is retried.

use std::sync::Arc;

use crate::{
  error::SubmissionError,
  rate_limit::{RateLimitPolicy, RateLimiter},
  sanitize::sanitize,
  store::DataStore,
  submission::{NewSubmission, SubmissionStatus},
  validate::validate,
};

/// Guards writes of contact submissions into a [`DataStore`].
///
/// The limiter is passed in rather than owned, so one limiter can be shared
/// by every gateway in the process (or replaced per test).
pub struct SubmissionGateway<S> {
  store:   Option<Arc<S>>,
  limiter: Arc<RateLimiter>,
  policy:  RateLimitPolicy,
}

impl<S> Clone for SubmissionGateway<S> {
  fn clone(&self) -> Self {
    Self {
      store:   self.store.clone(),
      limiter: Arc::clone(&self.limiter),
      policy:  self.policy.clone(),
    }
  }
}

impl<S: DataStore> SubmissionGateway<S> {
  /// `store` is `None` when persistence is not configured; every submission
  /// that gets past validation then fails with
  /// [`SubmissionError::StoreUnavailable`].
  pub fn new(store: Option<Arc<S>>, limiter: Arc<RateLimiter>) -> Self {
    Self {
      store,
      limiter,
      policy: RateLimitPolicy::default(),
    }
  }

  pub fn with_policy(mut self, policy: RateLimitPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn store(&self) -> Option<&Arc<S>> { self.store.as_ref() }

  pub fn limiter(&self) -> &Arc<RateLimiter> { &self.limiter }

  pub fn policy(&self) -> &RateLimitPolicy { &self.policy }

  pub fn is_configured(&self) -> bool { self.store.is_some() }

  /// Outcome for a request whose body could not be decoded into a
  /// submission. The attempt still counts against the limit.
  pub fn reject_malformed(&self, reason: impl Into<String>) -> SubmissionError {
    if !self.limiter.check(&self.policy) {
      tracing::info!(key = %self.policy.key, "malformed submission rejected: rate limited");
      return SubmissionError::RateLimited;
    }
    let reason = reason.into();
    tracing::debug!(%reason, "submission rejected: malformed body");
    SubmissionError::InvalidInput(vec![reason])
  }

  /// Rate-limit, validate, sanitize and persist `raw`.
  pub async fn submit(&self, raw: NewSubmission) -> Result<(), SubmissionError> {
    if !self.limiter.check(&self.policy) {
      tracing::info!(key = %self.policy.key, "submission rejected: rate limited");
      return Err(SubmissionError::RateLimited);
    }

    let result = validate(&raw);
    if !result.is_valid {
      tracing::debug!(errors = ?result.errors, "submission rejected: invalid input");
      return Err(SubmissionError::InvalidInput(result.errors));
    }

    let clean = NewSubmission {
      name:    sanitize(&raw.name),
      email:   sanitize(&raw.email),
      message: sanitize(&raw.message),
      status:  SubmissionStatus::New,
    };

    let Some(store) = &self.store else {
      tracing::warn!("submission rejected: no store configured");
      return Err(SubmissionError::StoreUnavailable);
    };

    match store.insert_submission(clean).await {
      Ok(saved) => {
        tracing::info!(id = %saved.id, "submission stored");
        Ok(())
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to store submission");
        Err(SubmissionError::PersistenceFailure(Box::new(e)))
      }
    }
  }
}
