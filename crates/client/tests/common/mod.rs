//! In-process fake CMS backend for client integration tests.
//!
//! Every request is recorded (method, path, query, auth and idempotency
//! headers, decoded body) and answered from a table of canned responses.
//! Unknown routes answer `404 { "message": "Not found" }`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{FromRequest, Multipart, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use cms_client::{CmsApi, SessionStore};

pub const TOKEN: &str = "test-token";

/// One multipart part as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct PartRecord {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    /// Text value, or the lossy text of a file's bytes.
    pub text: String,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedBody {
    Empty,
    Json(Value),
    Multipart(Vec<PartRecord>),
}

impl RecordedBody {
    pub fn json(&self) -> &Value {
        match self {
            RecordedBody::Json(value) => value,
            other => panic!("expected a JSON body, got {other:?}"),
        }
    }

    pub fn parts(&self) -> &[PartRecord] {
        match self {
            RecordedBody::Multipart(parts) => parts,
            other => panic!("expected a multipart body, got {other:?}"),
        }
    }

    pub fn part(&self, name: &str) -> Option<&PartRecord> {
        self.parts().iter().find(|p| p.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        match self {
            RecordedBody::Json(Value::Object(map)) => map.contains_key(name),
            RecordedBody::Multipart(parts) => parts.iter().any(|p| p.name == name),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub idempotency_key: Option<String>,
    pub body: RecordedBody,
}

impl RecordedRequest {
    /// Value of one query parameter.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then(|| v.to_string())
        })
    }
}

#[derive(Default)]
struct Shared {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
}

/// A running fake backend bound to an ephemeral local port.
pub struct FakeBackend {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new()
            .fallback(record_and_respond)
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            shared,
        }
    }

    /// Answer `method path` with `status` and a JSON `body`.
    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.shared
            .responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn api(&self) -> CmsApi {
        CmsApi::with_client(reqwest::Client::new(), &self.base_url)
    }
}

pub fn signed_in() -> SessionStore {
    let store = SessionStore::default();
    store.sign_in(TOKEN);
    store
}

/// A banner-shaped record.
pub fn banner(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "image": format!("https://cdn.example/{id}.png"),
        "isActive": true
    })
}

/// A listing envelope holding `items` under `key`.
pub fn page_of(key: &str, items: Vec<Value>, total_pages: Option<u32>) -> Value {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::Array(items));
    if let Some(total) = total_pages {
        body.insert("totalPages".to_string(), json!(total));
    }
    Value::Object(body)
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record_and_respond(State(shared): State<Arc<Shared>>, req: Request<Body>) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let authorization = header(req.headers(), AUTHORIZATION.as_str());
    let idempotency_key = header(req.headers(), "idempotency-key");
    let content_type = header(req.headers(), CONTENT_TYPE.as_str()).unwrap_or_default();

    let body = if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, &()).await.unwrap();
        let mut parts = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.unwrap();
            parts.push(PartRecord {
                name,
                file_name,
                content_type,
                text: String::from_utf8_lossy(&bytes).into_owned(),
                len: bytes.len(),
            });
        }
        RecordedBody::Multipart(parts)
    } else {
        let bytes = axum::body::to_bytes(req.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            RecordedBody::Empty
        } else {
            RecordedBody::Json(serde_json::from_slice(&bytes).unwrap())
        }
    };

    shared.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query,
        authorization,
        idempotency_key,
        body,
    });

    let canned = shared
        .responses
        .lock()
        .unwrap()
        .get(&(method, path))
        .cloned();
    match canned {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response(),
    }
}
