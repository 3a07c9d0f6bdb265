//! Tests for `RestStore` against a local fake of the hosted PostgREST API.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use atrium_core::{
  SubmissionError,
  gateway::SubmissionGateway,
  rate_limit::RateLimiter,
  service::{NewService, ServicePatch},
  store::DataStore,
  submission::{NewSubmission, SubmissionStatus},
};
use axum::{
  Json, Router,
  extract::{Query, State},
  http::{HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  routing::get,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{Error, RestConfig, RestStore};

const KEY: &str = "test-key";

// ─── Fake service ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Fake {
  submissions: Arc<Mutex<Vec<Value>>>,
  services:    Arc<Mutex<Vec<Value>>>,
}

type Params = Query<HashMap<String, String>>;

fn authorised(headers: &HeaderMap) -> Result<(), Response> {
  let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
  let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
  if apikey == Some(KEY) && bearer == Some(format!("Bearer {KEY}").as_str()) {
    Ok(())
  } else {
    Err(
      (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" })))
        .into_response(),
    )
  }
}

fn stamp(mut rows: Vec<Value>) -> Vec<Value> {
  for row in &mut rows {
    row["id"] = json!(Uuid::new_v4());
    row["created_at"] = json!(chrono::Utc::now());
    if row.get("updated_at").is_none() && row.get("title").is_some() {
      row["updated_at"] = Value::Null;
    }
  }
  rows
}

fn sorted(mut rows: Vec<Value>, order: Option<&String>) -> Vec<Value> {
  // Rows are kept in insertion order, which is creation order.
  match order.map(String::as_str) {
    Some("created_at.desc") => {
      rows.reverse();
      rows
    }
    Some("created_at.asc") | None => rows,
    Some(other) => panic!("unexpected order {other}"),
  }
}

async fn submissions_get(State(fake): State<Fake>, headers: HeaderMap, Query(q): Params) -> Response {
  if let Err(r) = authorised(&headers) {
    return r;
  }
  assert_eq!(q.get("select").map(String::as_str), Some("*"));
  let rows = fake.submissions.lock().unwrap().clone();
  Json(sorted(rows, q.get("order"))).into_response()
}

async fn submissions_post(
  State(fake): State<Fake>,
  headers: HeaderMap,
  Json(rows): Json<Vec<Value>>,
) -> Response {
  if let Err(r) = authorised(&headers) {
    return r;
  }
  let rows = stamp(rows);
  fake.submissions.lock().unwrap().extend(rows.clone());
  (StatusCode::CREATED, Json(rows)).into_response()
}

async fn services_get(State(fake): State<Fake>, headers: HeaderMap, Query(q): Params) -> Response {
  if let Err(r) = authorised(&headers) {
    return r;
  }
  let mut rows = fake.services.lock().unwrap().clone();
  if q.get("is_active").map(String::as_str) == Some("eq.true") {
    rows.retain(|r| r["is_active"] == json!(true));
  }
  if let Some(limit) = q.get("limit").and_then(|l| l.parse().ok()) {
    rows.truncate(limit);
  }
  Json(sorted(rows, q.get("order"))).into_response()
}

async fn services_post(
  State(fake): State<Fake>,
  headers: HeaderMap,
  Json(rows): Json<Vec<Value>>,
) -> Response {
  if let Err(r) = authorised(&headers) {
    return r;
  }
  let rows = stamp(rows);
  fake.services.lock().unwrap().extend(rows.clone());
  (StatusCode::CREATED, Json(rows)).into_response()
}

async fn services_patch(
  State(fake): State<Fake>,
  headers: HeaderMap,
  Query(q): Params,
  Json(patch): Json<Value>,
) -> Response {
  if let Err(r) = authorised(&headers) {
    return r;
  }
  let id = q
    .get("id")
    .and_then(|f| f.strip_prefix("eq."))
    .expect("id filter")
    .to_owned();
  let mut services = fake.services.lock().unwrap();
  let updated: Vec<Value> = services
    .iter_mut()
    .filter(|row| row["id"] == json!(id))
    .map(|row| {
      for (k, v) in patch.as_object().expect("object body") {
        row[k] = v.clone();
      }
      row.clone()
    })
    .collect();
  Json(updated).into_response()
}

async fn spawn_fake() -> (String, Fake) {
  let fake = Fake::default();
  let app = Router::new()
    .route(
      "/rest/v1/contact_submissions",
      get(submissions_get).post(submissions_post),
    )
    .route(
      "/rest/v1/services",
      get(services_get).post(services_post).patch(services_patch),
    )
    .with_state(fake.clone());

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
  (format!("http://{addr}/"), fake)
}

fn store_for(endpoint: &str, key: &str) -> RestStore {
  RestStore::new(RestConfig {
    endpoint:   endpoint.to_owned(),
    credential: key.to_owned(),
  })
  .unwrap()
}

fn service(title: &str, active: bool) -> NewService {
  NewService {
    title:       title.into(),
    description: "described".into(),
    icon:        "Users".into(),
    is_active:   active,
  }
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[test]
fn config_requires_both_settings() {
  assert!(RestConfig::from_parts(Some("https://db".into()), Some("k".into())).is_some());
  assert!(RestConfig::from_parts(Some("https://db".into()), None).is_none());
  assert!(RestConfig::from_parts(None, Some("k".into())).is_none());
  assert!(RestConfig::from_parts(Some("  ".into()), Some("k".into())).is_none());
}

// ─── Submissions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_list_submissions() {
  let (endpoint, fake) = spawn_fake().await;
  let store = store_for(&endpoint, KEY);

  let first = store
    .insert_submission(NewSubmission::new("Alice", "alice@example.com", "first message"))
    .await
    .unwrap();
  let second = store
    .insert_submission(NewSubmission::new("Bob", "bob@example.com", "second message"))
    .await
    .unwrap();
  assert_eq!(first.status, SubmissionStatus::New);

  let sent = fake.submissions.lock().unwrap().clone();
  assert_eq!(sent[0]["status"], json!("new"));
  assert_eq!(sent[0]["name"], json!("Alice"));

  let listed = store.list_submissions().await.unwrap();
  let ids: Vec<_> = listed.iter().map(|s| s.id).collect();
  assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn bad_key_surfaces_status_and_message() {
  let (endpoint, _fake) = spawn_fake().await;
  let store = store_for(&endpoint, "wrong");

  let err = store.list_submissions().await.unwrap_err();
  match err {
    Error::Status { status, message, .. } => {
      assert_eq!(status, 401);
      assert_eq!(message, "Invalid API key");
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[tokio::test]
async fn gateway_maps_rejected_write_to_persistence_failure() {
  let (endpoint, fake) = spawn_fake().await;
  let store = Arc::new(store_for(&endpoint, "wrong"));
  let gateway = SubmissionGateway::new(Some(store), Arc::new(RateLimiter::new()));

  let err = gateway
    .submit(NewSubmission::new("Jo", "jo@example.com", "Hello there, this works."))
    .await
    .unwrap_err();
  assert!(matches!(err, SubmissionError::PersistenceFailure(_)));
  assert!(fake.submissions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_endpoint_is_an_http_error() {
  // Bind then drop to get a port nobody listens on.
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let store = store_for(&format!("http://{addr}"), KEY);
  assert!(matches!(store.ping().await, Err(Error::Http(_))));
}

// ─── Services ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn active_services_only() {
  let (endpoint, _fake) = spawn_fake().await;
  let store = store_for(&endpoint, KEY);

  let shown = store.create_service(service("Planning", true)).await.unwrap();
  store.create_service(service("Retired", false)).await.unwrap();

  let listed = store.list_active_services().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, shown.id);
  assert!(listed[0].updated_at.is_none());
}

#[tokio::test]
async fn update_service_sends_patch_and_timestamp() {
  let (endpoint, fake) = spawn_fake().await;
  let store = store_for(&endpoint, KEY);
  let created = store.create_service(service("Planning", true)).await.unwrap();

  let updated = store
    .update_service(created.id, ServicePatch {
      title: Some("Strategic Planning".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .expect("row returned");

  assert_eq!(updated.title, "Strategic Planning");
  assert_eq!(updated.icon, "Users");
  assert!(updated.updated_at.is_some());

  // Untouched fields were not sent as nulls.
  let stored = fake.services.lock().unwrap()[0].clone();
  assert_eq!(stored["description"], json!("described"));
}

#[tokio::test]
async fn update_missing_service_returns_none() {
  let (endpoint, _fake) = spawn_fake().await;
  let store = store_for(&endpoint, KEY);
  let result = store
    .update_service(Uuid::new_v4(), ServicePatch::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn ping_round_trips() {
  let (endpoint, _fake) = spawn_fake().await;
  store_for(&endpoint, KEY).ping().await.unwrap();
}
