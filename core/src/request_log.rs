//! Request audit records and the store they are appended to.
//!
//! # Object Safety
//!
//! [`RequestLogStore`] returns `Pin<Box<dyn Future>>` instead of using
//! `async fn` so the store can be held as `Arc<dyn RequestLogStore>` in the
//! HTTP state and swapped for an in-memory or failing store in tests.

use crate::device::DeviceInfo;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;

/// Most rows a single query may return.
pub const MAX_QUERY_LIMIT: i64 = 1000;

/// Error type for request log storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestLogError {
    /// The backend rejected or failed the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// The backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for request log operations.
pub type Result<T> = std::result::Result<T, RequestLogError>;

/// Boxed future returned by [`RequestLogStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// One audited API request, as written to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLog {
    /// When the request was handled
    pub request_time: DateTime<Utc>,
    /// Order id the request was served for
    pub order_id: String,
    /// Composite fingerprint, `{device_type} - {browser} on {os}`
    pub device: String,
    /// Device type parsed from the user agent
    pub device_type: String,
    /// Browser parsed from the user agent
    pub browser: String,
    /// Operating system parsed from the user agent
    pub os: String,
    /// Caller address
    pub ip: String,
    /// Request path
    pub path: String,
}

impl RequestLog {
    /// Build a record from a classified user agent.
    #[must_use]
    pub fn new(
        request_time: DateTime<Utc>,
        order_id: impl Into<String>,
        info: &DeviceInfo,
        ip: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            request_time,
            order_id: order_id.into(),
            device: info.describe(),
            device_type: info.device_type.to_string(),
            browser: info.browser.to_string(),
            os: info.os.to_string(),
            ip: ip.into(),
            path: path.into(),
        }
    }
}

/// A record read back from the store, with store-assigned fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRequestLog {
    /// Store-assigned identifier
    pub id: i64,
    /// The audited request
    pub log: RequestLog,
    /// Insert time
    pub created_at: DateTime<Utc>,
    /// Last update time (equal to `created_at`, records are never updated)
    pub updated_at: DateTime<Utc>,
}

/// Append-only persistence for [`RequestLog`] records.
///
/// Appends are independent: no ordering is promised between concurrent
/// callers beyond the backend's own insertion order.
pub trait RequestLogStore: Send + Sync {
    /// Append a record and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLogError`] if the backend fails or is unreachable.
    fn append(&self, log: RequestLog) -> StoreFuture<'_, i64>;

    /// Most recent records, newest first.
    ///
    /// `limit` is clamped to `1..=`[`MAX_QUERY_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestLogError`] if the backend fails or is unreachable.
    fn recent(&self, limit: i64) -> StoreFuture<'_, Vec<StoredRequestLog>>;

    /// Records for one order id, newest first.
    ///
    /// `limit` is clamped to `1..=`[`MAX_QUERY_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestLogError`] if the backend fails or is unreachable.
    fn for_order<'a>(&'a self, order_id: &'a str, limit: i64) -> StoreFuture<'a, Vec<StoredRequestLog>>;
}

/// Clamp a caller-supplied query limit to `1..=`[`MAX_QUERY_LIMIT`].
#[must_use]
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_QUERY_LIMIT)
}
