use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendRequest {
    pub payload: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendResponse {
    pub key: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceiveRequest {
    pub key: String,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceiveResponse {
    pub payload: String,
}

pub const UPCHECK_BODY: &str = "I'm up!";
pub const FAILURE_BODY: &str = "boom";
pub const MALFORMED_BODY: &str = "not json";
/// Body served by `/binary/{code}`; not valid UTF-8.
pub const BINARY_BODY: &[u8] = b"fo\xffo";
/// Size of the body served by `/large`, above ureq's default 10 MiB read limit.
pub const LARGE_BODY_LEN: usize = 11 * 1024 * 1024;

/// Stored payloads keyed by the key returned from `/send`.
pub type Db = Arc<RwLock<HashMap<String, String>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/upcheck", get(upcheck))
        .route("/send", post(send))
        .route("/receive", post(receive))
        .route("/echo", post(echo))
        .route("/status/{code}", get(status).post(status))
        .route("/status/{code}/empty", get(status_empty).post(status_empty))
        .route("/malformed", post(malformed))
        .route("/binary/{code}", get(binary).post(binary))
        .route("/large", get(large).post(large))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn upcheck() -> &'static str {
    UPCHECK_BODY
}

async fn send(State(db): State<Db>, Json(input): Json<SendRequest>) -> Json<SendResponse> {
    let key = Uuid::new_v4().to_string();
    tracing::info!(%key, recipients = input.to.len(), "stored payload");
    db.write().await.insert(key.clone(), input.payload);
    Json(SendResponse { key })
}

async fn receive(
    State(db): State<Db>,
    Json(input): Json<ReceiveRequest>,
) -> Result<Json<ReceiveResponse>, (StatusCode, &'static str)> {
    let payloads = db.read().await;
    match payloads.get(&input.key) {
        Some(payload) => Ok(Json(ReceiveResponse {
            payload: payload.clone(),
        })),
        None => {
            tracing::debug!(key = %input.key, "unknown key");
            Err((StatusCode::NOT_FOUND, "key not found"))
        }
    }
}

async fn echo(Json(input): Json<Value>) -> Json<Value> {
    Json(input)
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, &'static str), StatusCode> {
    StatusCode::from_u16(code)
        .map(|status| (status, FAILURE_BODY))
        .map_err(|_| StatusCode::BAD_REQUEST)
}

async fn status_empty(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn malformed() -> &'static str {
    MALFORMED_BODY
}

async fn binary(Path(code): Path<u16>) -> Result<(StatusCode, &'static [u8]), StatusCode> {
    StatusCode::from_u16(code)
        .map(|status| (status, BINARY_BODY))
        .map_err(|_| StatusCode::BAD_REQUEST)
}

async fn large() -> String {
    "a".repeat(LARGE_BODY_LEN)
}
