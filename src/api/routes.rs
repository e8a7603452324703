//! HTTP surface: thin handlers delegating to the use cases.
//!
//! CORS is wide open: the desktop frontend talks to this from its own
//! origin, and every response is already public data.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::application::chat::ChatRequest;
use crate::domain::error::DomainError;
use crate::LiveBrief;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<LiveBrief>,
}

pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DomainError::MissingCredential(_) => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Completion(_) | DomainError::Embedding(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "pong" }))
}

#[derive(Deserialize)]
struct LiveQuery {
    max_stale_sec: Option<i64>,
}

async fn live(
    State(state): State<AppState>,
    Query(params): Query<LiveQuery>,
) -> impl IntoResponse {
    let max_stale = params
        .max_stale_sec
        .unwrap_or(state.app.max_stale_secs());
    Json(state.app.live(max_stale).await)
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    k: Option<usize>,
}

async fn rag_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if params.q.trim().is_empty() {
        return Err(DomainError::InvalidInput("q must not be empty".into()).into());
    }
    let k = params.k.unwrap_or(3).clamp(1, 10);
    let hits = state.app.rag_search(&params.q, k).await?;
    Ok(Json(hits))
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reply = state.app.chat(&request).await?;
    Ok(Json(ChatResponse { reply }))
}

pub fn router(app: Arc<LiveBrief>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/live", get(live))
        .route("/rag/search", get(rag_search))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(AppState { app })
}

pub async fn serve(app: Arc<LiveBrief>, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router(app)).await?;
    Ok(())
}
