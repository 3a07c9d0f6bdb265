//! [`SqliteStore`]: the SQLite implementation of [`DataStore`].

use std::path::Path;

use atrium_core::{
  service::{NewService, Service, ServicePatch},
  store::DataStore,
  submission::{NewSubmission, Submission},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawService, RawSubmission, encode_dt, encode_uuid, now},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Atrium data store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }
}

// ─── DataStore impl ──────────────────────────────────────────────────────────

impl DataStore for SqliteStore {
  type Error = crate::Error;

  // ── Submissions ───────────────────────────────────────────────────────────

  async fn insert_submission(&self, input: NewSubmission) -> Result<Submission> {
    let submission = Submission {
      id:         Uuid::new_v4(),
      name:       input.name,
      email:      input.email,
      message:    input.message,
      status:     input.status,
      created_at: now(),
    };

    let id_str     = encode_uuid(submission.id);
    let name       = submission.name.clone();
    let email      = submission.email.clone();
    let message    = submission.message.clone();
    let status_str = submission.status.as_str().to_owned();
    let at_str     = encode_dt(submission.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contact_submissions (id, name, email, message, status, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, email, message, status_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(submission)
  }

  async fn list_submissions(&self) -> Result<Vec<Submission>> {
    let raws: Vec<RawSubmission> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM contact_submissions ORDER BY created_at DESC, rowid DESC",
          RawSubmission::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawSubmission::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }

  // ── Services ──────────────────────────────────────────────────────────────

  async fn list_active_services(&self) -> Result<Vec<Service>> {
    let raws: Vec<RawService> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM services WHERE is_active = 1 ORDER BY created_at ASC, rowid ASC",
          RawService::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawService::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawService::into_service).collect()
  }

  async fn create_service(&self, input: NewService) -> Result<Service> {
    let service = Service {
      id:          Uuid::new_v4(),
      title:       input.title,
      description: input.description,
      icon:        input.icon,
      is_active:   input.is_active,
      created_at:  now(),
      updated_at:  None,
    };

    let id_str      = encode_uuid(service.id);
    let title       = service.title.clone();
    let description = service.description.clone();
    let icon        = service.icon.clone();
    let is_active   = service.is_active;
    let at_str      = encode_dt(service.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO services (id, title, description, icon, is_active, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, title, description, icon, is_active, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(service)
  }

  async fn update_service(&self, id: Uuid, patch: ServicePatch) -> Result<Option<Service>> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(now());

    // Update and re-read in one closure so no other write lands in between.
    let raw: Option<RawService> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE services SET
             title       = COALESCE(?2, title),
             description = COALESCE(?3, description),
             icon        = COALESCE(?4, icon),
             is_active   = COALESCE(?5, is_active),
             updated_at  = ?6
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            patch.title,
            patch.description,
            patch.icon,
            patch.is_active,
            at_str,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }

        let sql = format!("SELECT {} FROM services WHERE id = ?1", RawService::COLUMNS);
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawService::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawService::into_service).transpose()
  }

  // ── Health ────────────────────────────────────────────────────────────────

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT COUNT(*) FROM services", [], |row| {
          row.get::<_, i64>(0)
        })?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
