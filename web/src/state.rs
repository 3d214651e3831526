//! Application state for Axum handlers.

use order_mock_core::OrderService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cheap to clone; the service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Order generation plus request auditing
    pub service: Arc<OrderService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(service: OrderService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
