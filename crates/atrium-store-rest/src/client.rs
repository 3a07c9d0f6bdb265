//! [`RestStore`]: the hosted-database implementation of [`DataStore`].

use std::time::Duration;

use atrium_core::{
  service::{NewService, Service, ServicePatch},
  store::DataStore,
  submission::{NewSubmission, Submission},
};
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

const SUBMISSIONS: &str = "contact_submissions";
const SERVICES: &str = "services";

/// Where the hosted database lives and how to authenticate to it.
#[derive(Debug, Clone)]
pub struct RestConfig {
  /// Project URL, e.g. `https://abc.example.co`.
  pub endpoint:   String,
  /// Access key sent with every request.
  pub credential: String,
}

impl RestConfig {
  /// Build a config only when both settings are present and non-blank.
  ///
  /// A missing value means the store is unavailable, not misconfigured.
  pub fn from_parts(endpoint: Option<String>, credential: Option<String>) -> Option<Self> {
    let endpoint = endpoint.filter(|s| !s.trim().is_empty())?;
    let credential = credential.filter(|s| !s.trim().is_empty())?;
    Some(Self { endpoint, credential })
  }
}

/// Async client for the hosted PostgREST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RestStore {
  client: Client,
  config: RestConfig,
}

impl RestStore {
  pub fn new(config: RestConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &RestConfig { &self.config }

  fn url(&self, table: &str) -> String {
    format!(
      "{}/rest/v1/{}",
      self.config.endpoint.trim_end_matches('/'),
      table
    )
  }

  fn request(&self, method: Method, table: &str) -> RequestBuilder {
    self
      .client
      .request(method, self.url(table))
      .header("apikey", &self.config.credential)
      .bearer_auth(&self.config.credential)
  }

  /// Send `req` and decode a JSON body, turning error statuses into
  /// [`Error::Status`].
  async fn send<T: DeserializeOwned>(
    req: RequestBuilder,
    method: &'static str,
    table: &'static str,
  ) -> Result<T> {
    let resp = req.send().await?;
    let resp = check(resp, method, table).await?;
    Ok(resp.json().await?)
  }

  /// `POST` one row and return the stored representation.
  async fn insert<T: DeserializeOwned>(&self, table: &'static str, row: Value) -> Result<T> {
    let req = self
      .request(Method::POST, table)
      .header("Prefer", "return=representation")
      .json(&[row]);
    let rows: Vec<T> = Self::send(req, "POST", table).await?;
    rows.into_iter().next().ok_or(Error::EmptyResponse(table))
  }
}

async fn check(resp: Response, method: &'static str, table: &'static str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  // PostgREST reports errors as `{"message": ...}`; fall back to the raw body.
  let message = serde_json::from_str::<Value>(&body)
    .ok()
    .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
    .unwrap_or(body);
  tracing::warn!(method, table, status = status.as_u16(), %message, "store request failed");
  Err(Error::Status {
    method,
    table,
    status: status.as_u16(),
    message,
  })
}

// ─── DataStore impl ──────────────────────────────────────────────────────────

impl DataStore for RestStore {
  type Error = Error;

  async fn insert_submission(&self, input: NewSubmission) -> Result<Submission> {
    self.insert(SUBMISSIONS, serde_json::to_value(&input)?).await
  }

  async fn list_submissions(&self) -> Result<Vec<Submission>> {
    let req = self
      .request(Method::GET, SUBMISSIONS)
      .query(&[("select", "*"), ("order", "created_at.desc")]);
    Self::send(req, "GET", SUBMISSIONS).await
  }

  async fn list_active_services(&self) -> Result<Vec<Service>> {
    let req = self.request(Method::GET, SERVICES).query(&[
      ("select", "*"),
      ("is_active", "eq.true"),
      ("order", "created_at.asc"),
    ]);
    Self::send(req, "GET", SERVICES).await
  }

  async fn create_service(&self, input: NewService) -> Result<Service> {
    self.insert(SERVICES, serde_json::to_value(&input)?).await
  }

  async fn update_service(&self, id: Uuid, patch: ServicePatch) -> Result<Option<Service>> {
    let mut body = serde_json::to_value(&patch)?;
    if let Value::Object(fields) = &mut body {
      fields.insert("updated_at".into(), serde_json::to_value(Utc::now())?);
    }

    let req = self
      .request(Method::PATCH, SERVICES)
      .query(&[("id", format!("eq.{id}"))])
      .header("Prefer", "return=representation")
      .json(&body);
    let rows: Vec<Service> = Self::send(req, "PATCH", SERVICES).await?;
    Ok(rows.into_iter().next())
  }

  async fn ping(&self) -> Result<()> {
    let req = self
      .request(Method::GET, SERVICES)
      .query(&[("select", "id"), ("limit", "1")]);
    let _: Vec<Value> = Self::send(req, "GET", SERVICES).await?;
    Ok(())
  }
}
