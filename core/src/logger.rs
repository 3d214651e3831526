//! Best-effort request audit logging.
//!
//! [`RequestLogger::log`] classifies the caller, appends one record and never
//! reports failure to its caller: a store error is logged, counted and dropped.
//! There is no retry and no queue; the append is awaited in line.

use crate::device::{UNKNOWN, classify};
use crate::environment::Clock;
use crate::request_log::{RequestLog, RequestLogStore};
use std::sync::Arc;

/// Request metadata captured at the HTTP boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMeta {
    /// Raw `User-Agent` header
    pub user_agent: String,
    /// Caller address
    pub ip: String,
    /// Request path
    pub path: String,
}

impl RequestMeta {
    /// Build request metadata. Missing values are recorded as `Unknown`.
    #[must_use]
    pub fn new(user_agent: Option<String>, ip: Option<String>, path: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.unwrap_or_else(|| UNKNOWN.to_string()),
            ip: ip.unwrap_or_else(|| UNKNOWN.to_string()),
            path: path.into(),
        }
    }
}

/// Appends a [`RequestLog`] per served order.
#[derive(Clone)]
pub struct RequestLogger {
    store: Arc<dyn RequestLogStore>,
    clock: Arc<dyn Clock>,
}

impl RequestLogger {
    /// Create a logger writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RequestLogStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record that `order_id` was served to the caller described by `meta`.
    ///
    /// Failures are reported through `tracing` and swallowed.
    pub async fn log(&self, order_id: &str, meta: &RequestMeta) {
        let info = classify(&meta.user_agent);
        let record = RequestLog::new(self.clock.now(), order_id, &info, &meta.ip, &meta.path);
        let device = record.device.clone();

        match self.store.append(record).await {
            Ok(id) => {
                tracing::info!(log_id = id, order_id, device = %device, "Request log saved");
            }
            Err(error) => {
                tracing::error!(order_id, device = %device, error = %error, "Failed to save request log");
                metrics::counter!("request_log.append_failed").increment(1);
            }
        }
    }
}
