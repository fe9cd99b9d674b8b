//! Text creation and cached reads
//!
//! `TextService` is the front-end's one mutation path plus the read path the
//! cache sits on. Creating a text is a single asynchronous unit of work:
//! concurrent invocations are independent, nothing is retried, and the store
//! decides write ordering.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use lt_common::models::{Text, TextWithTags};

use crate::cache::QueryCache;
use crate::store::{StoreError, TextStore};

/// Logical cache key for the texts-with-tags projection
pub const TEXTS_QUERY_KEY: &str = "texts";

/// Errors from the create-text operation
#[derive(Debug, Error)]
pub enum AddTextError {
    /// The store reported an error during insert; embeds the store detail
    #[error("Failed to add text: {0}")]
    InsertFailed(String),

    /// The store reported success but returned no created record
    #[error("No data returned after adding text")]
    EmptyResult,
}

/// Text operations against the injected store client
#[derive(Clone)]
pub struct TextService {
    store: Arc<dyn TextStore>,
    cache: Arc<QueryCache>,
}

impl TextService {
    pub fn new(store: Arc<dyn TextStore>, cache: Arc<QueryCache>) -> Self {
        Self { store, cache }
    }

    /// The query cache backing this service
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Create a new text from caller-supplied content
    ///
    /// Content is forwarded as-is (no length or emptiness validation); the
    /// store assigns id and timestamps. On success the `"texts"` query is
    /// invalidated so dependent views refetch; that step is fire-and-forget
    /// and never changes the reported outcome. A store "success" without a
    /// created record is an error, never coerced to a placeholder value.
    pub async fn add_text(&self, content: &str) -> Result<Text, AddTextError> {
        let created = self
            .store
            .insert_text(content)
            .await
            .map_err(|e| AddTextError::InsertFailed(e.to_string()))?;

        let Some(created) = created else {
            return Err(AddTextError::EmptyResult);
        };

        self.cache.invalidate(TEXTS_QUERY_KEY).await;
        debug!(key = TEXTS_QUERY_KEY, "query invalidated after insert");

        info!(text_id = %created.id, "text created");
        Ok(created)
    }

    /// Texts with their tags, newest first
    ///
    /// Served from the cache under `"texts"` when present; otherwise fetched
    /// from the store and cached until the next invalidation. The generation
    /// is captured before the fetch, so a key invalidated while the fetch is
    /// in flight is not overwritten with the pre-invalidation snapshot.
    pub async fn texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError> {
        if let Some(cached) = self.cache.get::<Vec<TextWithTags>>(TEXTS_QUERY_KEY).await {
            debug!(key = TEXTS_QUERY_KEY, "serving texts from cache");
            return Ok(cached);
        }

        let generation = self.cache.generation(TEXTS_QUERY_KEY).await;
        let texts = self.store.list_texts_with_tags().await?;
        self.cache.put(TEXTS_QUERY_KEY, &texts, generation).await;
        Ok(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Echoes the submitted content back as a freshly-created row
    struct EchoStore;

    #[async_trait]
    impl TextStore for EchoStore {
        async fn insert_text(&self, content: &str) -> Result<Option<Text>, StoreError> {
            let now = Utc::now();
            Ok(Some(Text {
                id: Uuid::new_v4(),
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            }))
        }

        async fn list_texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError> {
            Ok(vec![])
        }
    }

    /// Fails every insert with a fixed store detail
    struct FailingStore {
        detail: String,
    }

    #[async_trait]
    impl TextStore for FailingStore {
        async fn insert_text(&self, _content: &str) -> Result<Option<Text>, StoreError> {
            Err(StoreError::NetworkError(self.detail.clone()))
        }

        async fn list_texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError> {
            Err(StoreError::NetworkError(self.detail.clone()))
        }
    }

    /// Reports success but returns no created record
    struct EmptyStore;

    #[async_trait]
    impl TextStore for EmptyStore {
        async fn insert_text(&self, _content: &str) -> Result<Option<Text>, StoreError> {
            Ok(None)
        }

        async fn list_texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError> {
            Ok(vec![])
        }
    }

    /// Counts projection fetches so cache hits are observable
    struct CountingStore {
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl TextStore for CountingStore {
        async fn insert_text(&self, content: &str) -> Result<Option<Text>, StoreError> {
            let now = Utc::now();
            Ok(Some(Text {
                id: Uuid::new_v4(),
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            }))
        }

        async fn list_texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    fn service(store: Arc<dyn TextStore>) -> TextService {
        TextService::new(store, Arc::new(QueryCache::new(16)))
    }

    #[tokio::test]
    async fn test_add_text_echoes_content_byte_for_byte() {
        let svc = service(Arc::new(EchoStore));

        let content = "Штирлиц шёл по лесу.\nВторая строка.";
        let created = svc.add_text(content).await.expect("should create");
        assert_eq!(created.content, content);
    }

    #[tokio::test]
    async fn test_add_text_store_error_embeds_detail() {
        let svc = service(Arc::new(FailingStore {
            detail: "timeout".to_string(),
        }));

        let err = svc.add_text("anything").await.expect_err("should fail");
        let message = err.to_string();
        assert!(message.contains("Failed to add text"));
        assert!(message.contains("timeout"));
    }

    #[tokio::test]
    async fn test_add_text_empty_result_is_failure() {
        let svc = service(Arc::new(EmptyStore));

        let err = svc.add_text("anything").await.expect_err("should fail");
        assert_eq!(err.to_string(), "No data returned after adding text");
    }

    #[tokio::test]
    async fn test_add_text_invalidates_texts_exactly_once() {
        let svc = service(Arc::new(EchoStore));
        let mut rx = svc.cache().subscribe();

        svc.add_text("hello").await.expect("should create");

        let event = rx.try_recv().expect("should be invalidated once");
        let lt_common::events::CacheEvent::QueryInvalidated { key, .. } = event;
        assert_eq!(key, TEXTS_QUERY_KEY);
        assert!(rx.try_recv().is_err(), "exactly one invalidation expected");
    }

    #[tokio::test]
    async fn test_failed_add_does_not_invalidate() {
        let svc = service(Arc::new(FailingStore {
            detail: "boom".to_string(),
        }));
        let mut rx = svc.cache().subscribe();

        svc.add_text("hello").await.expect_err("should fail");
        assert!(rx.try_recv().is_err(), "no invalidation after failure");

        let svc = service(Arc::new(EmptyStore));
        let mut rx = svc.cache().subscribe();

        svc.add_text("hello").await.expect_err("should fail");
        assert!(rx.try_recv().is_err(), "no invalidation after empty result");
    }

    #[tokio::test]
    async fn test_reads_cached_until_invalidated() {
        let store = Arc::new(CountingStore {
            list_calls: AtomicUsize::new(0),
        });
        let svc = TextService::new(store.clone(), Arc::new(QueryCache::new(16)));

        svc.texts_with_tags().await.expect("should fetch");
        svc.texts_with_tags().await.expect("should hit cache");
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);

        svc.add_text("new one").await.expect("should create");

        svc.texts_with_tags().await.expect("should refetch");
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_inflight_read_does_not_recache_stale_snapshot() {
        use tokio::sync::Notify;

        /// Holds its first projection fetch until released, so a create can
        /// land in the middle of a read
        struct DelayedStore {
            release_first_list: Notify,
            list_calls: AtomicUsize,
        }

        #[async_trait]
        impl TextStore for DelayedStore {
            async fn insert_text(&self, content: &str) -> Result<Option<Text>, StoreError> {
                let now = Utc::now();
                Ok(Some(Text {
                    id: Uuid::new_v4(),
                    content: content.to_string(),
                    created_at: now,
                    updated_at: now,
                }))
            }

            async fn list_texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError> {
                let call = self.list_calls.fetch_add(1, Ordering::SeqCst);
                if call == 0 {
                    // Pre-create snapshot, delivered after the create lands
                    self.release_first_list.notified().await;
                    Ok(vec![])
                } else {
                    let now = Utc::now();
                    Ok(vec![TextWithTags {
                        id: Uuid::new_v4(),
                        content: "fresh".to_string(),
                        created_at: now,
                        updated_at: now,
                        tags: vec![],
                    }])
                }
            }
        }

        let store = Arc::new(DelayedStore {
            release_first_list: Notify::new(),
            list_calls: AtomicUsize::new(0),
        });
        let svc = TextService::new(store.clone(), Arc::new(QueryCache::new(16)));

        let inflight = tokio::spawn({
            let svc = svc.clone();
            async move { svc.texts_with_tags().await }
        });

        // Wait until the read has reached the store
        while store.list_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // The create invalidates "texts" while the first fetch is suspended
        svc.add_text("fresh").await.expect("should create");
        store.release_first_list.notify_one();
        inflight
            .await
            .expect("read task should finish")
            .expect("in-flight read should succeed");

        // The stale snapshot must not have been re-cached: the next read
        // goes back to the store and sees the created text
        let texts = svc.texts_with_tags().await.expect("should refetch");
        assert_eq!(
            store.list_calls.load(Ordering::SeqCst),
            2,
            "invalidated key must be refetched from the store"
        );
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].content, "fresh");
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_independent() {
        let svc = service(Arc::new(EchoStore));

        let (a, b) = tokio::join!(svc.add_text("first"), svc.add_text("second"));
        let a = a.expect("first should create");
        let b = b.expect("second should create");
        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
        assert_ne!(a.id, b.id);
    }
}
