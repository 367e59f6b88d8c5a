//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ConversationView, DraftRequest, ErrorResponse, PersonaInfo, PersonaRequest, PersonasResponse,
    PromptRequest, QueuedResponse,
};
use super::AppState;
use crate::persona::Persona;
use crate::runtime::RuntimeStopped;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversation snapshot and live updates
        .route("/api/conversation", get(get_conversation))
        .route("/api/conversation/stream", get(stream_conversation))
        // User actions
        .route("/api/conversation/prompt", post(submit_prompt))
        .route("/api/conversation/suggestion", post(click_suggestion))
        .route("/api/conversation/persona", post(select_persona))
        .route("/api/conversation/draft", put(update_draft))
        // Persona catalogue
        .route("/api/personas", get(list_personas))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation
// ============================================================

async fn get_conversation(State(state): State<AppState>) -> Json<ConversationView> {
    Json(ConversationView::from(&state.conversation.snapshot()))
}

async fn stream_conversation(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.conversation.subscribe())
}

// ============================================================
// User Actions
// ============================================================

async fn submit_prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.conversation.submit(req.text).await?;
    Ok(Json(QueuedResponse { queued: true }))
}

async fn click_suggestion(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.conversation.click_suggestion(req.text).await?;
    Ok(Json(QueuedResponse { queued: true }))
}

async fn select_persona(
    State(state): State<AppState>,
    Json(req): Json<PersonaRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    let persona: Persona = req
        .persona
        .parse()
        .map_err(|e: crate::persona::UnknownPersona| AppError::BadRequest(e.to_string()))?;
    state.conversation.select_persona(persona).await?;
    Ok(Json(QueuedResponse { queued: true }))
}

async fn update_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.conversation.update_draft(req.text).await?;
    Ok(Json(QueuedResponse { queued: true }))
}

// ============================================================
// Personas
// ============================================================

async fn list_personas(State(state): State<AppState>) -> Json<PersonasResponse> {
    Json(PersonasResponse {
        personas: Persona::ALL.into_iter().map(PersonaInfo::from).collect(),
        selected: state.conversation.snapshot().persona,
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("persona-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<RuntimeStopped> for AppError {
    fn from(e: RuntimeStopped) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
