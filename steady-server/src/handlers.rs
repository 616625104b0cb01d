use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use steady_core::persona::relapse::process_response;
use steady_core::Error;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct RagChatRequest {
    pub prompt: String,
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub relapsed: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        response: "Server is running.".to_string(),
    })
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Path(persona): Path<String>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    let session = state.registry.get(&persona).await;
    let mut session = session.lock().await;
    session.switch_prompt(&persona);

    let raw = session
        .chat(&payload.prompt)
        .await
        .map_err(error_response)?;
    Ok(Json(into_chat_response(raw)))
}

pub async fn rag_chat_handler(
    State(state): State<AppState>,
    Path(persona): Path<String>,
    Json(payload): Json<RagChatRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    let session = state.registry.get(&persona).await;
    let mut session = session.lock().await;
    session.switch_prompt(&persona);

    let raw = session
        .chat_with_context(&payload.prompt, &payload.context)
        .await
        .map_err(error_response)?;
    Ok(Json(into_chat_response(raw)))
}

pub async fn clear_handler(
    State(state): State<AppState>,
    Path(persona): Path<String>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let session = state.registry.get(&persona).await;
    let mut session = session.lock().await;
    session.clear_history().map_err(error_response)?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

fn into_chat_response(raw: String) -> ChatResponse {
    let (response, relapsed) = process_response(&raw);
    ChatResponse { response, relapsed }
}

fn error_response(e: Error) -> HandlerError {
    tracing::error!("Chat request failed: {}", e);
    let status = match &e {
        Error::Provider(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
