//! Runtime choice of [`DataStore`] implementation.

use atrium_core::{
  service::{NewService, Service, ServicePatch},
  store::DataStore,
  submission::{NewSubmission, Submission},
};
use atrium_store_rest::RestStore;
use atrium_store_sqlite::SqliteStore;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum BackendError {
  #[error(transparent)]
  Sqlite(#[from] atrium_store_sqlite::Error),

  #[error(transparent)]
  Rest(#[from] atrium_store_rest::Error),
}

/// The store selected by configuration.
pub enum Backend {
  Sqlite(SqliteStore),
  Rest(RestStore),
}

impl Backend {
  /// Open the configured store.
  ///
  /// `sqlite_path` wins over the hosted store. Returns `Ok(None)` when
  /// neither is configured; submissions then fail as unavailable.
  pub async fn from_config(cfg: &ServerConfig) -> Result<Option<Self>, BackendError> {
    if let Some(path) = cfg.sqlite_path() {
      tracing::info!(path = %path.display(), "using sqlite store");
      return Ok(Some(Backend::Sqlite(SqliteStore::open(&path).await?)));
    }
    if let Some(rest) = cfg.rest_config() {
      tracing::info!(endpoint = %rest.endpoint, "using hosted store");
      return Ok(Some(Backend::Rest(RestStore::new(rest)?)));
    }
    tracing::warn!("no store configured; contact submissions will be refused");
    Ok(None)
  }

  pub fn name(&self) -> &'static str {
    match self {
      Backend::Sqlite(_) => "sqlite",
      Backend::Rest(_) => "rest",
    }
  }
}

impl DataStore for Backend {
  type Error = BackendError;

  async fn insert_submission(&self, input: NewSubmission) -> Result<Submission, Self::Error> {
    Ok(match self {
      Backend::Sqlite(s) => s.insert_submission(input).await?,
      Backend::Rest(s) => s.insert_submission(input).await?,
    })
  }

  async fn list_submissions(&self) -> Result<Vec<Submission>, Self::Error> {
    Ok(match self {
      Backend::Sqlite(s) => s.list_submissions().await?,
      Backend::Rest(s) => s.list_submissions().await?,
    })
  }

  async fn list_active_services(&self) -> Result<Vec<Service>, Self::Error> {
    Ok(match self {
      Backend::Sqlite(s) => s.list_active_services().await?,
      Backend::Rest(s) => s.list_active_services().await?,
    })
  }

  async fn create_service(&self, input: NewService) -> Result<Service, Self::Error> {
    Ok(match self {
      Backend::Sqlite(s) => s.create_service(input).await?,
      Backend::Rest(s) => s.create_service(input).await?,
    })
  }

  async fn update_service(
    &self,
    id: Uuid,
    patch: ServicePatch,
  ) -> Result<Option<Service>, Self::Error> {
    Ok(match self {
      Backend::Sqlite(s) => s.update_service(id, patch).await?,
      Backend::Rest(s) => s.update_service(id, patch).await?,
    })
  }

  async fn ping(&self) -> Result<(), Self::Error> {
    match self {
      Backend::Sqlite(s) => s.ping().await?,
      Backend::Rest(s) => s.ping().await?,
    }
    Ok(())
  }
}
