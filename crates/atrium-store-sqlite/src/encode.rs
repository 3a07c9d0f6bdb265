//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with fixed microsecond precision
//! so that lexical order matches chronological order. UUIDs are stored as
//! hyphenated lowercase strings.

use atrium_core::{
  service::Service,
  submission::{Submission, SubmissionStatus},
};
use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// Current time at the precision timestamps are stored with, so records
/// returned from a write compare equal to the same records read back.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// Raw values read directly from a `contact_submissions` row.
pub struct RawSubmission {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub message:    String,
  pub status:     String,
  pub created_at: String,
}

impl RawSubmission {
  pub const COLUMNS: &'static str = "id, name, email, message, status, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      message:    row.get(3)?,
      status:     row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    Ok(Submission {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      email:      self.email,
      message:    self.message,
      status:     SubmissionStatus::parse(&self.status)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `services` row.
pub struct RawService {
  pub id:          String,
  pub title:       String,
  pub description: String,
  pub icon:        String,
  pub is_active:   bool,
  pub created_at:  String,
  pub updated_at:  Option<String>,
}

impl RawService {
  pub const COLUMNS: &'static str =
    "id, title, description, icon, is_active, created_at, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      icon:        row.get(3)?,
      is_active:   row.get(4)?,
      created_at:  row.get(5)?,
      updated_at:  row.get(6)?,
    })
  }

  pub fn into_service(self) -> Result<Service> {
    Ok(Service {
      id:          decode_uuid(&self.id)?,
      title:       self.title,
      description: self.description,
      icon:        self.icon,
      is_active:   self.is_active,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  self.updated_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn timestamps_sort_lexically() {
    let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let b = a + chrono::Duration::microseconds(1);
    let c = a + chrono::Duration::milliseconds(100);
    let mut encoded = vec![encode_dt(c), encode_dt(a), encode_dt(b)];
    encoded.sort();
    assert_eq!(encoded, vec![encode_dt(a), encode_dt(b), encode_dt(c)]);
    assert_eq!(decode_dt(&encode_dt(b)).unwrap(), b);
  }

  #[test]
  fn bad_date_is_reported() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
