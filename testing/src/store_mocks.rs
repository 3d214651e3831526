//! In-memory request log stores for testing
//!
//! - [`InMemoryRequestLogStore`]: `Vec`-backed store with inspection helpers
//! - [`FailingRequestLogStore`]: rejects every call, counts append attempts

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use chrono::Utc;
use order_mock_core::request_log::{
    RequestLog, RequestLogError, RequestLogStore, StoreFuture, StoredRequestLog, clamp_limit,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory request log store for fast, deterministic testing.
///
/// # Example
///
/// ```
/// use order_mock_core::device::classify;
/// use order_mock_core::request_log::{RequestLog, RequestLogStore};
/// use order_mock_testing::InMemoryRequestLogStore;
/// use chrono::Utc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryRequestLogStore::new();
/// let log = RequestLog::new(Utc::now(), "1", &classify(""), "127.0.0.1", "/api/getOrder");
///
/// let id = store.append(log).await?;
/// assert_eq!(id, 1);
/// assert_eq!(store.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryRequestLogStore {
    records: Arc<RwLock<Vec<StoredRequestLog>>>,
}

impl InMemoryRequestLogStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// All records in insertion order
    #[must_use]
    pub fn records(&self) -> Vec<StoredRequestLog> {
        self.records.read().unwrap().clone()
    }

    /// Order ids of all records in insertion order
    #[must_use]
    pub fn order_ids(&self) -> Vec<String> {
        self.records
            .read()
            .unwrap()
            .iter()
            .map(|stored| stored.log.order_id.clone())
            .collect()
    }

    /// Clear all records (for test isolation)
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }

    fn newest_matching(&self, limit: i64, keep: impl Fn(&StoredRequestLog) -> bool) -> Vec<StoredRequestLog> {
        let limit = usize::try_from(clamp_limit(limit)).unwrap_or(usize::MAX);
        self.records
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|stored| keep(stored))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl RequestLogStore for InMemoryRequestLogStore {
    fn append(&self, log: RequestLog) -> StoreFuture<'_, i64> {
        Box::pin(async move {
            let mut records = self.records.write().unwrap();
            let id = i64::try_from(records.len()).unwrap_or(i64::MAX) + 1;
            let now = Utc::now();
            records.push(StoredRequestLog {
                id,
                log,
                created_at: now,
                updated_at: now,
            });
            Ok(id)
        })
    }

    fn recent(&self, limit: i64) -> StoreFuture<'_, Vec<StoredRequestLog>> {
        Box::pin(async move { Ok(self.newest_matching(limit, |_| true)) })
    }

    fn for_order<'a>(&'a self, order_id: &'a str, limit: i64) -> StoreFuture<'a, Vec<StoredRequestLog>> {
        Box::pin(async move { Ok(self.newest_matching(limit, |stored| stored.log.order_id == order_id)) })
    }
}

/// Store that fails every operation.
///
/// Used to check that audit failures never reach the caller.
#[derive(Debug, Default)]
pub struct FailingRequestLogStore {
    attempts: AtomicUsize,
}

impl FailingRequestLogStore {
    /// Create a failing store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of append calls received so far
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn unavailable<T: Send + 'static>() -> StoreFuture<'static, T> {
        Box::pin(async { Err::<T, _>(RequestLogError::Unavailable("store is down".to_string())) })
    }
}

impl RequestLogStore for FailingRequestLogStore {
    fn append(&self, _log: RequestLog) -> StoreFuture<'_, i64> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Self::unavailable()
    }

    fn recent(&self, _limit: i64) -> StoreFuture<'_, Vec<StoredRequestLog>> {
        Self::unavailable()
    }

    fn for_order<'a>(&'a self, _order_id: &'a str, _limit: i64) -> StoreFuture<'a, Vec<StoredRequestLog>> {
        Self::unavailable()
    }
}
