//! Service listings shown on the public site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_active() -> bool { true }

/// A persisted service listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
  /// Icon name understood by the front end (e.g. `"Target"`).
  pub icon:        String,
  pub is_active:   bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  Option<DateTime<Utc>>,
}

/// Input for creating a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewService {
  pub title:       String,
  pub description: String,
  pub icon:        String,
  #[serde(default = "default_active")]
  pub is_active:   bool,
}

/// Partial update for a service. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_active:   Option<bool>,
}

impl ServicePatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.icon.is_none()
      && self.is_active.is_none()
  }
}

/// Listings served when no store is configured, so the site still renders.
pub fn fallback_services() -> Vec<Service> {
  let created_at = DateTime::<Utc>::default();
  [
    (
      "Strategic Planning",
      "Comprehensive business strategy development to achieve your goals \
       and maximize growth potential.",
      "Target",
    ),
    (
      "Team Development",
      "Building high-performance teams through training, coaching, and \
       organizational development.",
      "Users",
    ),
    (
      "Quality Assurance",
      "Ensuring excellence in every aspect of your business operations and \
       customer experience.",
      "Award",
    ),
  ]
  .into_iter()
  .enumerate()
  .map(|(i, (title, description, icon))| Service {
    id: Uuid::from_u128(i as u128 + 1),
    title: title.to_owned(),
    description: description.to_owned(),
    icon: icon.to_owned(),
    is_active: true,
    created_at,
    updated_at: None,
  })
  .collect()
}
