//! `ApiClient` through the router against an in-memory CRUD backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use edge_router::client::{ApiClient, ClientError, FahrtUpdate, NewFahrt};
use edge_router::config::FallbackMode;
use edge_router::{EdgeServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

mod common;

#[derive(Default)]
struct Store {
    next_id: i64,
    kv: Vec<Value>,
    fahrten: Vec<Value>,
    list_queries: Vec<(HashMap<String, String>, Option<String>)>,
}

type Shared = Arc<Mutex<Store>>;

fn record_list(store: &mut Store, query: HashMap<String, String>, headers: &HeaderMap) {
    let cache_control = headers
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    store.list_queries.push((query, cache_control));
}

async fn kv_list(
    State(store): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut store = store.lock().unwrap();
    let Some(page) = query.get("page").cloned() else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "missing ?page"})));
    };
    record_list(&mut store, query, &headers);
    let items: Vec<Value> = store.kv.iter().filter(|e| e["page"] == page).cloned().collect();
    (StatusCode::OK, Json(json!({ "items": items })))
}

async fn kv_set(State(store): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut store = store.lock().unwrap();
    store.kv.retain(|e| !(e["page"] == body["page"] && e["key"] == body["key"]));
    store.next_id += 1;
    let entry = json!({
        "id": store.next_id,
        "page": body["page"],
        "key": body["key"],
        "value": body["value"],
        "created_at": "2026-10-18T10:00:00Z",
    });
    store.kv.push(entry.clone());
    (StatusCode::CREATED, Json(entry))
}

fn remove_by_id(items: &mut Vec<Value>, id: i64) -> (StatusCode, Json<Value>) {
    let before = items.len();
    items.retain(|e| e["id"] != id);
    if items.len() == before {
        (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})))
    } else {
        (StatusCode::OK, Json(json!({ "deleted": id })))
    }
}

async fn kv_delete(State(store): State<Shared>, Path(id): Path<i64>) -> impl IntoResponse {
    remove_by_id(&mut store.lock().unwrap().kv, id)
}

async fn fahrten_list(
    State(store): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut store = store.lock().unwrap();
    record_list(&mut store, query, &headers);
    Json(json!({ "items": store.fahrten }))
}

async fn fahrten_create(State(store): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut store = store.lock().unwrap();
    store.next_id += 1;
    let row = json!({
        "id": store.next_id,
        "created_at": "2026-10-18T10:00:00Z",
        "start": body["start"],
        "ziel": body["ziel"],
        "dauer_minutes": body.get("dauer_minutes").cloned().unwrap_or(Value::Null),
    });
    store.fahrten.push(row.clone());
    (StatusCode::CREATED, Json(row))
}

async fn fahrten_update(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut store = store.lock().unwrap();
    match store.fahrten.iter_mut().find(|e| e["id"] == id) {
        Some(row) => {
            for field in ["start", "ziel", "dauer_minutes"] {
                if let Some(v) = body.get(field) {
                    row[field] = v.clone();
                }
            }
            (StatusCode::OK, Json(row.clone()))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))),
    }
}

async fn fahrten_delete(State(store): State<Shared>, Path(id): Path<i64>) -> impl IntoResponse {
    remove_by_id(&mut store.lock().unwrap().fahrten, id)
}

async fn start_stack() -> (ApiClient, Shared, Shutdown) {
    let store: Shared = Arc::default();
    let backend_app = Router::new()
        .route("/api/kv", get(kv_list).post(kv_set))
        .route("/api/kv/{id}", delete(kv_delete))
        .route("/api/fahrten", get(fahrten_list).post(fahrten_create))
        .route("/api/fahrten/{id}", delete(fahrten_delete).put(fahrten_update))
        .with_state(store.clone());
    let backend: SocketAddr = common::serve(backend_app).await;

    let server = EdgeServer::new(common::config_for(backend, FallbackMode::NotFound)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    tokio::spawn(server.run(listener, shutdown.subscribe()));

    let api = ApiClient::new(&format!("http://{}", addr)).unwrap();
    (api, store, shutdown)
}

#[tokio::test]
async fn test_kv_roundtrip_through_router() {
    let (api, store, shutdown) = start_stack().await;

    let entry = api.kv().set("home", "theme", &json!({"dark": true})).await.unwrap();
    assert_eq!(entry.page, "home");
    assert_eq!(entry.value, json!({"dark": true}));

    api.kv().set("other", "x", &json!(1)).await.unwrap();

    let items = api.kv().list("home").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].key, "theme");

    api.kv().remove(entry.id).await.unwrap();
    assert!(api.kv().list("home").await.unwrap().is_empty());

    {
        let store = store.lock().unwrap();
        let (query, cache_control) = &store.list_queries[0];
        assert_eq!(query["page"], "home");
        assert!(query["t"].parse::<i64>().is_ok());
        assert_eq!(cache_control.as_deref(), Some("no-store"));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_fahrten_crud_through_router() {
    let (api, _store, shutdown) = start_stack().await;

    let created = api
        .fahrten()
        .create(&NewFahrt {
            start: "Berlin".into(),
            ziel: "Hamburg".into(),
            dauer_minutes: Some(95),
        })
        .await
        .unwrap();
    assert_eq!(created.dauer_minutes, Some(95));

    let updated = api
        .fahrten()
        .update(
            created.id,
            &FahrtUpdate {
                ziel: Some("Bremen".into()),
                ..FahrtUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.start, "Berlin");
    assert_eq!(updated.ziel, "Bremen");

    let all = api.fahrten().list().await.unwrap();
    assert_eq!(all, vec![updated.clone()]);

    api.fahrten().remove(created.id).await.unwrap();
    assert!(api.fahrten().list().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_2xx_is_an_error() {
    let (api, _store, shutdown) = start_stack().await;

    let err = api.fahrten().remove(999).await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_ping_is_answered_by_router() {
    let (api, _store, shutdown) = start_stack().await;

    let pong = api.ping().await.unwrap();
    assert_eq!(pong["ok"], true);
    assert!(pong["ts"].is_number());

    shutdown.trigger();
}
