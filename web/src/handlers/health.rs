//! Liveness endpoint for load balancers.

use axum::http::StatusCode;

/// Simple health check endpoint.
///
/// Returns 200 OK to indicate the service is running. The request log
/// store is not consulted; audit failures never make the API unhealthy.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
