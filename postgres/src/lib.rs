//! `PostgreSQL` request log store for the mock order API.
//!
//! Implements [`RequestLogStore`] over a single `request_logs` table, created
//! by the embedded migrations together with its `created_at DESC` and
//! `order_id` indexes. Queries use the runtime `sqlx` API, so building the
//! crate does not need a live database.
//!
//! # Example
//!
//! ```ignore
//! use order_mock_postgres::PostgresRequestLogStore;
//!
//! let store = PostgresRequestLogStore::connect("postgres://localhost/order_mock").await?;
//! store.migrate().await?;
//! let latest = store.recent(20).await?;
//! ```

mod store;

pub use store::PostgresRequestLogStore;
