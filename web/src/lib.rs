//! Axum integration for the mock order API.
//!
//! The handlers are a thin shell over [`order_mock_core::OrderService`]:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            HTTP shell (Axum)            │  ← query params, headers
//! │  - Request metadata extraction          │  ← CORS, tracing
//! │  - Envelope serialization               │  ← panics → 500
//! ├─────────────────────────────────────────┤
//! │             Order service               │
//! │  - Order generation                     │
//! │  - Best-effort request auditing         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives inside an `http_request` span
//! 2. **Extract** query parameters, `User-Agent` and client IP
//! 3. **Generate** the order(s) through the service
//! 4. **Audit** each order id, swallowing store failures
//! 5. **Wrap** the result in a `{code, message, data}` envelope
//!
//! # Example
//!
//! ```ignore
//! use order_mock_web::{AppState, build_router};
//!
//! let app = build_router(AppState::new(service));
//! axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use envelope::ApiResponse;
pub use error::AppError;
pub use extractors::{ClientIp, UserAgent};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use router::build_router;
pub use state::AppState;
