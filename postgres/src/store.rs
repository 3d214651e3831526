//! `request_logs` table access.

use chrono::{DateTime, Utc};
use order_mock_core::request_log::{
    RequestLog, RequestLogError, RequestLogStore, Result, StoreFuture, StoredRequestLog, clamp_limit,
};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Pool size used by [`PostgresRequestLogStore::connect`].
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

const SELECT_COLUMNS: &str = "id, request_time, order_id, device, device_type, browser, os, ip, path, \
     created_at, updated_at";

/// `PostgreSQL` request log store.
#[derive(Clone, Debug)]
pub struct PostgresRequestLogStore {
    pool: PgPool,
}

impl PostgresRequestLogStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with a default-sized pool.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLogError::Unavailable`] if the database cannot be reached.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(|e| RequestLogError::Unavailable(format!("Failed to connect: {e}")))?;

        Ok(Self::new(pool))
    }

    /// Create the `request_logs` table and its indexes if missing.
    ///
    /// # Errors
    ///
    /// Returns [`RequestLogError::Storage`] if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RequestLogError::Storage(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection, waiting for checked-out ones.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn insert(&self, log: RequestLog) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO request_logs
                 (request_time, order_id, device, device_type, browser, os, ip, path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(log.request_time)
        .bind(&log.order_id)
        .bind(&log.device)
        .bind(&log.device_type)
        .bind(&log.browser)
        .bind(&log.os)
        .bind(&log.ip)
        .bind(&log.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to append request log", e))?;

        metrics::counter!("request_log.appended").increment(1);
        tracing::debug!(log_id = id, order_id = %log.order_id, "Request log inserted");

        Ok(id)
    }

    async fn select_recent(&self, limit: i64) -> Result<Vec<StoredRequestLog>> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM request_logs
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );

        let rows: Vec<RequestLogRow> = sqlx::query_as(&query)
            .bind(clamp_limit(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to load recent request logs", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn select_for_order(&self, order_id: &str, limit: i64) -> Result<Vec<StoredRequestLog>> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM request_logs
             WHERE order_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );

        let rows: Vec<RequestLogRow> = sqlx::query_as(&query)
            .bind(order_id)
            .bind(clamp_limit(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to load request logs for order", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl RequestLogStore for PostgresRequestLogStore {
    fn append(&self, log: RequestLog) -> StoreFuture<'_, i64> {
        Box::pin(self.insert(log))
    }

    fn recent(&self, limit: i64) -> StoreFuture<'_, Vec<StoredRequestLog>> {
        Box::pin(self.select_recent(limit))
    }

    fn for_order<'a>(&'a self, order_id: &'a str, limit: i64) -> StoreFuture<'a, Vec<StoredRequestLog>> {
        Box::pin(self.select_for_order(order_id, limit))
    }
}

/// Connection-level failures are `Unavailable`; everything else is `Storage`.
fn map_sqlx_error(context: &str, error: sqlx::Error) -> RequestLogError {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Tls(_) => {
            RequestLogError::Unavailable(format!("{context}: {error}"))
        }
        other => RequestLogError::Storage(format!("{context}: {other}")),
    }
}

#[derive(sqlx::FromRow)]
struct RequestLogRow {
    id: i64,
    request_time: DateTime<Utc>,
    order_id: String,
    device: String,
    device_type: String,
    browser: String,
    os: String,
    ip: String,
    path: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RequestLogRow> for StoredRequestLog {
    fn from(row: RequestLogRow) -> Self {
        Self {
            id: row.id,
            log: RequestLog {
                request_time: row.request_time,
                order_id: row.order_id,
                device: row.device,
                device_type: row.device_type,
                browser: row.browser,
                os: row.os,
                ip: row.ip,
                path: row.path,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
