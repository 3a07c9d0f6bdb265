//! The `DataStore` trait.
//!
//! Implemented by storage backends (`atrium-store-rest` for the hosted
//! database, `atrium-store-sqlite` for local use). The gateway and the API
//! depend on this abstraction, not on a concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  service::{NewService, Service, ServicePatch},
  submission::{NewSubmission, Submission},
};

/// Abstraction over the persistence service behind the site.
///
/// Two record collections exist: contact submissions and services. IDs and
/// timestamps are assigned by the store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DataStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Submissions ───────────────────────────────────────────────────────

  /// Persist a submission and return the stored record.
  fn insert_submission(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// All submissions, newest first.
  fn list_submissions(
    &self,
  ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send + '_;

  // ── Services ──────────────────────────────────────────────────────────

  /// Active services, oldest first.
  fn list_active_services(
    &self,
  ) -> impl Future<Output = Result<Vec<Service>, Self::Error>> + Send + '_;

  fn create_service(
    &self,
    input: NewService,
  ) -> impl Future<Output = Result<Service, Self::Error>> + Send + '_;

  /// Apply `patch` to the service with `id` and stamp `updated_at`.
  /// Returns `None` if no such service exists.
  fn update_service(
    &self,
    id: Uuid,
    patch: ServicePatch,
  ) -> impl Future<Output = Result<Option<Service>, Self::Error>> + Send + '_;

  // ── Health ────────────────────────────────────────────────────────────

  /// Cheap round trip proving the store is reachable and its tables exist.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
