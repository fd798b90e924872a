// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! In-process CRUD backend used by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use crudbench_core::{BaseUrl, Endpoint, EndpointName};

/// How the fake backend behaves.
#[derive(Clone)]
pub struct BackendOptions {
    /// Field name carrying the id in create responses; `None` omits it.
    pub id_field: Option<&'static str>,
    /// Zero-based create call that answers 500.
    pub fail_create_at: Option<usize>,
    /// Item routes end with `/`.
    pub trailing_slash: bool,
    /// Serve `GET /items/`.
    pub list_route: bool,
    /// Stall every item GET before answering.
    pub read_delay: Option<Duration>,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            id_field: Some("id"),
            fail_create_at: None,
            trailing_slash: false,
            list_route: true,
            read_delay: None,
        }
    }
}

/// Shared state of a running fake backend.
#[derive(Clone)]
pub struct Backend {
    options: BackendOptions,
    items: Arc<Mutex<HashMap<u64, Value>>>,
    next_id: Arc<AtomicU64>,
    creates: Arc<AtomicUsize>,
    /// Method of every request, in arrival order.
    calls: Arc<Mutex<Vec<&'static str>>>,
    /// Names received by PUT.
    updated_names: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    fn new(options: BackendOptions) -> Self {
        Self {
            options,
            items: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            creates: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            updated_names: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored_items(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn updated_names(&self) -> Vec<String> {
        self.updated_names.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }
}

/// Start a backend on an ephemeral port; returns its base URL and state.
pub async fn spawn_backend(options: BackendOptions) -> (String, Backend) {
    let backend = Backend::new(options.clone());

    let item_route = if options.trailing_slash {
        "/items/{id}/"
    } else {
        "/items/{id}"
    };

    let collection = if options.list_route {
        get(list_items).post(create_item)
    } else {
        axum::routing::post(create_item)
    };

    let app = Router::new()
        .route("/items/", collection)
        .route(item_route, get(get_item).put(update_item).delete(delete_item))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}

/// A base URL nothing listens on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{}", port)
}

pub fn endpoint(name: &str, url: &str, trailing_slash: bool) -> Endpoint {
    Endpoint::new(EndpointName::new(name).unwrap(), BaseUrl::new(url).unwrap())
        .with_trailing_slash(trailing_slash)
}

async fn list_items(State(state): State<Backend>) -> Json<Vec<Value>> {
    state.record("LIST");
    Json(state.items.lock().unwrap().values().cloned().collect())
}

async fn create_item(State(state): State<Backend>, Json(body): Json<Value>) -> Response {
    state.record("POST");

    let call = state.creates.fetch_add(1, Ordering::SeqCst);
    if state.options.fail_create_at == Some(call) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "simulated failure").into_response();
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    state.items.lock().unwrap().insert(id, body.clone());

    let mut response = Map::new();
    match state.options.id_field {
        Some(field) => {
            response.insert(field.to_string(), json!(id));
        }
        None => {
            response.insert("ok".to_string(), json!(true));
        }
    }
    if let Value::Object(fields) = body {
        for (key, value) in fields {
            response.entry(key).or_insert(value);
        }
    }

    (StatusCode::CREATED, Json(Value::Object(response))).into_response()
}

async fn get_item(State(state): State<Backend>, Path(id): Path<u64>) -> Response {
    state.record("GET");
    if let Some(delay) = state.options.read_delay {
        tokio::time::sleep(delay).await;
    }
    match state.items.lock().unwrap().get(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_item(
    State(state): State<Backend>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    state.record("PUT");
    if let Some(name) = body.get("name").and_then(Value::as_str) {
        state.updated_names.lock().unwrap().push(name.to_string());
    }

    let mut items = state.items.lock().unwrap();
    match items.get_mut(&id) {
        Some(item) => {
            *item = body;
            Json(item.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_item(State(state): State<Backend>, Path(id): Path<u64>) -> StatusCode {
    state.record("DELETE");
    match state.items.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
