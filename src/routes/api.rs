use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::agents::{TextSource, MISSING_CREDENTIAL_CODE};
use crate::certificate::{CertificateRequest, FALLBACK_TEXT};
use crate::errors::GenerationError;
use crate::state::AppState;

/// Intermediary that keeps the Gemini key on the server. Answers
/// `{ "text": ... }`, or a 500 with `{ "error": ... }` when the key is absent
/// or the upstream call fails.
pub async fn generate_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CertificateRequest>,
) -> Response {
    match state.gemini.generate(&request).await {
        Ok(text) => Json(json!({ "text": text })).into_response(),
        // Upstream answered but without usable text
        Err(GenerationError::Malformed(_) | GenerationError::EmptyText) => {
            Json(json!({ "text": FALLBACK_TEXT })).into_response()
        }
        Err(GenerationError::MissingCredential) => {
            error!("GEMINI_API_KEY is not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Server missing API key",
                    "code": MISSING_CREDENTIAL_CODE,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Function error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to generate text" })),
            )
                .into_response()
        }
    }
}
