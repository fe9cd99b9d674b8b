//! Text browsing and creation handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::render::render_texts_page;
use crate::AppState;

/// POST /api/texts request body
#[derive(Debug, Deserialize)]
pub struct AddTextRequest {
    pub content: String,
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// POST /api/texts
///
/// Create a new text from caller-supplied content. Returns the created
/// record as the store assigned it. Both store-reported failures and a
/// success without a created record surface as 502: the upstream store
/// misbehaved, not the caller.
pub async fn add_text(
    State(state): State<AppState>,
    Json(request): Json<AddTextRequest>,
) -> Response {
    match state.texts.add_text(&request.content).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => {
            warn!(error = %e, "text creation failed");
            error_body(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// GET /api/texts
///
/// Texts with their tags as JSON, newest first.
pub async fn list_texts(State(state): State<AppState>) -> Response {
    match state.texts.texts_with_tags().await {
        Ok(texts) => Json(texts).into_response(),
        Err(e) => {
            warn!(error = %e, "texts fetch failed");
            error_body(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// GET /texts
///
/// Texts with their tags rendered as HTML cards.
pub async fn texts_page(State(state): State<AppState>) -> Response {
    match state.texts.texts_with_tags().await {
        Ok(texts) => Html(render_texts_page(&texts)).into_response(),
        Err(e) => {
            warn!(error = %e, "texts fetch failed");
            error_body(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
