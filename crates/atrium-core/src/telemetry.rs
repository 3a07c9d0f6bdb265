//! Outcome telemetry.
//!
//! [`EventLog`] keeps the most recent events in memory and mirrors each one
//! to `tracing`. Shipping events to an analytics service is out of scope;
//! anything that wants them can read [`EventLog::events`].

use std::{
  collections::VecDeque,
  fmt::Display,
  future::Future,
  sync::{Mutex, MutexGuard, PoisonError},
  time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// How many events are retained before the oldest are dropped.
pub const DEFAULT_CAPACITY: usize = 100;

pub const CONTACT_FORM_SUBMISSION: &str = "contact_form_submission";
pub const SERVICE_VIEW: &str = "service_view";
pub const API_CALL: &str = "api_call";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  pub event:      String,
  #[serde(default)]
  pub properties: Map<String, Value>,
  pub timestamp:  DateTime<Utc>,
}

#[derive(Debug)]
pub struct EventLog {
  capacity: usize,
  events:   Mutex<VecDeque<Event>>,
}

impl Default for EventLog {
  fn default() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }
}

impl EventLog {
  pub fn new() -> Self { Self::default() }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      capacity,
      events: Mutex::new(VecDeque::with_capacity(capacity)),
    }
  }

  fn lock(&self) -> MutexGuard<'_, VecDeque<Event>> {
    self.events.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn track(&self, event: &str, properties: Map<String, Value>) {
    let payload = Value::Object(properties.clone());
    tracing::info!(
      target: "atrium::telemetry",
      event,
      properties = %payload,
      "telemetry event"
    );

    let mut events = self.lock();
    events.push_back(Event {
      event: event.to_owned(),
      properties,
      timestamp: Utc::now(),
    });
    while events.len() > self.capacity {
      events.pop_front();
    }
  }

  /// Record the outcome of a contact-form submission.
  pub fn track_contact_submission(&self, success: bool, error: Option<&str>) {
    let mut properties = Map::new();
    properties.insert("success".into(), json!(success));
    if let Some(error) = error {
      properties.insert("error".into(), json!(error));
    }
    self.track(CONTACT_FORM_SUBMISSION, properties);
  }

  pub fn track_service_view(&self, service_id: &str, service_name: &str) {
    let mut properties = Map::new();
    properties.insert("service_id".into(), json!(service_id));
    properties.insert("service_name".into(), json!(service_name));
    self.track(SERVICE_VIEW, properties);
  }

  /// Record one timed call to the store. `duration` is reported in
  /// milliseconds.
  pub fn track_api_call(&self, name: &str, duration: Duration, error: Option<&str>) {
    let mut properties = Map::new();
    properties.insert("name".into(), json!(name));
    properties.insert("duration".into(), json!(duration.as_secs_f64() * 1000.0));
    properties.insert("success".into(), json!(error.is_none()));
    if let Some(error) = error {
      properties.insert("error".into(), json!(error));
    }
    self.track(API_CALL, properties);
  }

  /// Await `call`, then record an [`API_CALL`] event with its duration and
  /// outcome. The result is passed through untouched.
  pub async fn measure_api_call<T, E, F>(&self, name: &str, call: F) -> Result<T, E>
  where
    E: Display,
    F: Future<Output = Result<T, E>>,
  {
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed();
    match &result {
      Ok(_) => self.track_api_call(name, elapsed, None),
      Err(e) => self.track_api_call(name, elapsed, Some(&e.to_string())),
    }
    result
  }

  /// Snapshot of retained events, oldest first.
  pub fn events(&self) -> Vec<Event> { self.lock().iter().cloned().collect() }

  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}
