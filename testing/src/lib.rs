//! # Order Mock Testing
//!
//! Testing utilities for the mock order API.
//!
//! This crate provides:
//! - [`FixedClock`]: deterministic time
//! - [`InMemoryRequestLogStore`]: `Vec`-backed request log store
//! - [`FailingRequestLogStore`]: a store whose every call fails
//! - [`init_test_tracing`]: opt-in log output for a test run
//!
//! ## Example
//!
//! ```
//! use order_mock_core::{OrderService, RequestMeta};
//! use order_mock_testing::{InMemoryRequestLogStore, test_clock};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let store = Arc::new(InMemoryRequestLogStore::new());
//! let service = OrderService::new(store.clone(), Arc::new(test_clock()));
//!
//! let meta = RequestMeta::new(None, None, "/api/getOrder");
//! let order = service.get_order("10", &meta).await;
//!
//! assert!(order.order_sn.contains("10"));
//! assert_eq!(store.len(), 1);
//! # }
//! ```

use chrono::{DateTime, Utc};
use order_mock_core::environment::Clock;

mod store_mocks;

pub use store_mocks::{FailingRequestLogStore, InMemoryRequestLogStore};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use order_mock_testing::mocks::FixedClock;
    /// use order_mock_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

/// Install a `fmt` subscriber honouring `RUST_LOG`, once per process.
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
