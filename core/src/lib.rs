//! # Order Mock Core
//!
//! Domain logic for the mock order API: fabricated orders, user-agent
//! classification and best-effort request auditing.
//!
//! ## Components
//!
//! - **Generator** ([`generator`]): builds an [`Order`] with 1 to 15 items
//! - **Classifier** ([`device`]): ordered substring rules over a user agent
//! - **Request logger** ([`logger`]): classify, append, swallow failures
//! - **Service** ([`service`]): the two read operations served over HTTP
//!
//! Persistence sits behind the object-safe [`RequestLogStore`] trait; the
//! `PostgreSQL` implementation lives in `order-mock-postgres` and in-memory
//! doubles in `order-mock-testing`.
//!
//! ## Example
//!
//! ```ignore
//! use order_mock_core::{BatchSize, OrderService, RequestMeta};
//! use order_mock_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! let service = OrderService::new(store, Arc::new(SystemClock));
//! let meta = RequestMeta::new(Some(user_agent), Some(ip), "/api/getOrders");
//! let orders = service.get_orders(BatchSize::parse(Some("5")), &meta).await;
//! assert_eq!(orders.len(), 5);
//! ```

pub mod batch;
pub mod device;
pub mod environment;
pub mod generator;
pub mod logger;
pub mod order;
pub mod request_log;
pub mod service;

pub use batch::{BatchSize, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
pub use device::{DeviceInfo, classify};
pub use logger::{RequestLogger, RequestMeta};
pub use order::{Order, OrderItem};
pub use request_log::{RequestLog, RequestLogError, RequestLogStore, StoredRequestLog};
pub use service::OrderService;
