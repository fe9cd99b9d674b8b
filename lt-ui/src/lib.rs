//! lt-ui library - Living Tags web front-end
//!
//! Browsing, adding, and viewing AI-tagged text snippets. Persistence lives
//! in the external managed store; this module only creates texts and reads
//! the texts-with-tags projection through `store::TextStore`.

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::texts::TextService;

pub mod api;
pub mod cache;
pub mod render;
pub mod store;
pub mod texts;

/// Application state shared across HTTP handlers
///
/// The store client is injected at startup and reused for the life of the
/// process; there is no module-global client.
#[derive(Clone)]
pub struct AppState {
    /// Text creation and cached read operations
    pub texts: TextService,
}

impl AppState {
    /// Create new application state
    pub fn new(texts: TextService) -> Self {
        Self { texts }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/texts", get(api::texts_page))
        .route("/api/texts", get(api::list_texts).post(api::add_text))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
