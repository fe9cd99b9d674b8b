//! Cache event types
//!
//! Events are broadcast when a cached query is invalidated so that any view
//! subscribed to that query key can refetch fresh data. Emission is lossy:
//! a missing subscriber never affects the operation that triggered the event.

use serde::{Deserialize, Serialize};

/// Living Tags cache events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CacheEvent {
    /// A cached query was invalidated; subscribers should refetch
    QueryInvalidated {
        /// Logical query key (e.g. "texts")
        key: String,
        /// When invalidation happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl CacheEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            CacheEvent::QueryInvalidated { .. } => "QueryInvalidated",
        }
    }
}
