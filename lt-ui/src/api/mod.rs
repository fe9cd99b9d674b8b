//! HTTP API handlers for lt-ui

pub mod health;
pub mod texts;
pub mod ui;

pub use health::health_routes;
pub use texts::{add_text, list_texts, texts_page};
pub use ui::serve_index;
