//! HTTP API.
//!
//! Exposes transcript lookup and the chat endpoint. The router is built here
//! so it can be served by `youchat serve` or driven directly in tests.

mod types;

pub use types::{ChatReply, ChatRequest, ChatResponse, ErrorResponse, TranscriptQuery, TranscriptResponse};

use crate::dispatcher::ChatDispatcher;
use crate::error::{ErrorKind, YouChatError};
use crate::session::ConversationId;
use crate::video::VideoId;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Shared application state.
pub struct AppState {
    pub dispatcher: ChatDispatcher,
}

impl AppState {
    pub fn new(dispatcher: ChatDispatcher) -> Arc<Self> {
        Arc::new(Self { dispatcher })
    }
}

/// Build the API router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/transcript", get(transcript))
        .route("/transcript/", get(transcript))
        .route("/chat", post(chat))
        .route("/chat/", post(chat))
        .layer(cors)
        .with_state(state)
}

/// An error rendered as `{detail, kind}` with a status code.
struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                detail: detail.into(),
                kind,
            },
        }
    }

    /// Errors from `/transcript/`: every failure is the caller's bad video.
    fn from_transcript(err: YouChatError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.kind(), err.detail())
    }

    /// Errors from `/chat/`: only validation is the caller's fault.
    fn from_chat(err: YouChatError) -> Self {
        match &err {
            YouChatError::Validation(msg) => {
                Self::new(StatusCode::BAD_REQUEST, ErrorKind::Validation, msg.clone())
            }
            YouChatError::TranscriptUnavailable { message, .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::Retrieval,
                format!("Failed to fetch transcript: {}", message),
            ),
            YouChatError::Generation(msg) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::Generation,
                format!("Failed to call generative API: {}", msg),
            ),
            other => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                other.kind(),
                other.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TranscriptQuery>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let video_id = match query.video_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => VideoId::new(id.trim()),
        None => {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                ErrorKind::Validation,
                "video_id is required",
            ))
        }
    };

    match state.dispatcher.fetcher().fetch(&video_id).await {
        Ok(transcript) => Ok(Json(TranscriptResponse {
            video_id: transcript.video_id.to_string(),
            transcript: transcript.text,
        })),
        Err(e) => {
            warn!("Transcript request for {} failed: {}", video_id, e);
            Err(ApiError::from_transcript(e))
        }
    }
}

async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            ErrorKind::Validation,
            rejection.body_text(),
        )
    })?;

    let conversation = req
        .conversation_id
        .filter(|id| !id.trim().is_empty())
        .map(ConversationId::new)
        .unwrap_or_default();
    let message = req.message.unwrap_or_default();

    match state.dispatcher.handle(&conversation, &message).await {
        Ok(outcome) => Ok(Json(ChatResponse {
            reply: ChatReply::assistant(outcome.reply),
            conversation_id: outcome.conversation_id.to_string(),
        })),
        Err(e) => {
            warn!("Chat request in {} failed: {}", conversation, e);
            Err(ApiError::from_chat(e))
        }
    }
}
