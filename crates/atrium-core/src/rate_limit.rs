//! In-memory sliding-window rate limiter.
//!
//! State is process-local and resets on restart. It is not a durable or
//! distributed limit. Construct one [`RateLimiter`] per process (or per test)
//! and hand it to whoever needs it.

use std::{
  collections::HashMap,
  sync::{Mutex, MutexGuard, PoisonError},
  time::{Duration, Instant},
};

/// Key used for the public contact form.
pub const CONTACT_FORM_KEY: &str = "contact-form";
/// Attempts allowed per window on the contact form.
pub const CONTACT_FORM_MAX_ATTEMPTS: usize = 3;
/// Length of the contact-form window.
pub const CONTACT_FORM_WINDOW: Duration = Duration::from_millis(300_000);

/// Which key to count against, and how many attempts fit in which window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
  pub key:          String,
  pub max_attempts: usize,
  pub window:       Duration,
}

impl Default for RateLimitPolicy {
  fn default() -> Self {
    Self {
      key:          CONTACT_FORM_KEY.to_owned(),
      max_attempts: CONTACT_FORM_MAX_ATTEMPTS,
      window:       CONTACT_FORM_WINDOW,
    }
  }
}

#[derive(Debug, Default)]
struct History {
  /// Window used by the most recent check; the sweeper prunes with it.
  window: Duration,
  hits:   Vec<Instant>,
}

impl History {
  fn prune(&mut self, now: Instant) {
    let window = self.window;
    self
      .hits
      .retain(|&hit| now.saturating_duration_since(hit) <= window);
  }
}

/// Sliding-window attempt counter keyed by an action identifier.
///
/// Access to the per-key history is serialised by a mutex, so one limiter
/// can be shared across tasks behind an `Arc`.
#[derive(Debug, Default)]
pub struct RateLimiter {
  keys: Mutex<HashMap<String, History>>,
}

impl RateLimiter {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, HashMap<String, History>> {
    // The map holds plain data; a panic mid-update cannot break it.
    self.keys.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Record an attempt for `key` if fewer than `max_attempts` happened in the
  /// trailing `window`. Returns whether the attempt was allowed.
  pub fn is_allowed(&self, key: &str, max_attempts: usize, window: Duration) -> bool {
    self.is_allowed_at(key, max_attempts, window, Instant::now())
  }

  /// [`is_allowed`](Self::is_allowed) with an explicit clock reading.
  pub fn is_allowed_at(
    &self,
    key: &str,
    max_attempts: usize,
    window: Duration,
    now: Instant,
  ) -> bool {
    let mut keys = self.lock();
    let history = keys.entry(key.to_owned()).or_default();
    history.window = window;
    history.prune(now);

    if history.hits.len() < max_attempts {
      history.hits.push(now);
      true
    } else {
      tracing::debug!(key, max_attempts, ?window, "rate limit reached");
      false
    }
  }

  /// Check `policy` at the current time.
  pub fn check(&self, policy: &RateLimitPolicy) -> bool {
    self.is_allowed(&policy.key, policy.max_attempts, policy.window)
  }

  /// Number of attempts for `key` still inside its window at `now`.
  pub fn attempts_at(&self, key: &str, now: Instant) -> usize {
    let mut keys = self.lock();
    match keys.get_mut(key) {
      Some(history) => {
        history.prune(now);
        history.hits.len()
      }
      None => 0,
    }
  }

  /// Prune every key and forget the ones with no attempts left in their
  /// window. Returns how many keys were dropped.
  pub fn sweep_at(&self, now: Instant) -> usize {
    let mut keys = self.lock();
    let before = keys.len();
    keys.retain(|_, history| {
      history.prune(now);
      !history.hits.is_empty()
    });
    before - keys.len()
  }

  pub fn sweep(&self) -> usize { self.sweep_at(Instant::now()) }

  /// Forget all recorded attempts.
  pub fn reset(&self) { self.lock().clear(); }

  /// Number of keys currently tracked.
  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}
