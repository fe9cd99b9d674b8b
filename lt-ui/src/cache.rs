//! Client-side query cache with invalidation broadcast
//!
//! Read results are cached under logical query keys (e.g. "texts").
//! Invalidating a key drops the cached value, bumps the key's generation,
//! and broadcasts a `CacheEvent::QueryInvalidated` so subscribed views
//! refetch. The broadcast uses tokio::broadcast, so publishing never blocks
//! and a missing or slow subscriber never affects the caller.
//!
//! Writes carry the generation observed before the fetch they cache. A write
//! whose generation is stale (the key was invalidated while the fetch was in
//! flight) is skipped, so a pre-invalidation snapshot can never be re-cached
//! over fresher state.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};

use lt_common::events::CacheEvent;

#[derive(Default)]
struct Slot {
    value: Option<serde_json::Value>,
    generation: u64,
}

/// Keyed read cache plus invalidation signal
pub struct QueryCache {
    entries: RwLock<HashMap<String, Slot>>,
    tx: broadcast::Sender<CacheEvent>,
    capacity: usize,
}

impl QueryCache {
    /// Create a cache whose invalidation channel buffers `capacity` events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            entries: RwLock::new(HashMap::new()),
            tx,
            capacity,
        }
    }

    /// Look up a cached query result
    ///
    /// A value that no longer deserializes to `T` is treated as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        let value = entries.get(key)?.value.as_ref()?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Current generation of `key`; bumped by every invalidation
    ///
    /// Capture this before fetching the value a `put` will cache.
    pub async fn generation(&self, key: &str) -> u64 {
        self.entries
            .read()
            .await
            .get(key)
            .map(|slot| slot.generation)
            .unwrap_or(0)
    }

    /// Store a query result under `key`
    ///
    /// The write is skipped when the key was invalidated after
    /// `observed_generation` was captured; the fetched value belongs to a
    /// snapshot from before that invalidation. A value that fails to
    /// serialize is also not cached; reads fall through to the store.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T, observed_generation: u64) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "not caching unserializable value");
                return;
            }
        };

        let mut entries = self.entries.write().await;
        let slot = entries.entry(key.to_string()).or_default();
        if slot.generation == observed_generation {
            slot.value = Some(json);
        } else {
            tracing::debug!(
                key = %key,
                observed_generation,
                current_generation = slot.generation,
                "not caching value fetched before invalidation"
            );
        }
    }

    /// Invalidate a query key: drop the cached value and notify subscribers
    ///
    /// Fire-and-forget: send errors (no subscribers) are logged and ignored.
    pub async fn invalidate(&self, key: &str) {
        {
            let mut entries = self.entries.write().await;
            let slot = entries.entry(key.to_string()).or_default();
            slot.value = None;
            slot.generation += 1;
        }

        let event = CacheEvent::QueryInvalidated {
            key: key.to_string(),
            timestamp: chrono::Utc::now(),
        };
        if self.tx.send(event).is_err() {
            tracing::debug!(key = %key, "query invalidated with no subscribers");
        }
    }

    /// Subscribe to invalidation events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.tx.subscribe()
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured invalidation channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
