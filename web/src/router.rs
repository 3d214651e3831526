//! Route table and middleware stack.

use crate::error::AppError;
use crate::handlers::{get_order, get_orders, health_check};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Build the application router.
///
/// ```text
/// GET /health
/// GET /api/getOrder?id=..
/// GET /api/getOrders?count=..
/// ```
///
/// See [`with_middleware`] for the layer stack.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/getOrder", get(get_order))
        .route("/getOrders", get(get_orders));

    let routes = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state);

    with_middleware(routes)
}

/// Wrap `routes` in the shared layers, outermost first: correlation id,
/// trace, CORS (permissive), catch-panic.
fn with_middleware(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}

/// Render a handler panic as the generic 500 envelope.
#[allow(clippy::needless_pass_by_value)] // signature required by CatchPanicLayer
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    AppError::internal()
        .with_source(anyhow::anyhow!("handler panicked: {detail}"))
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can unwrap and panic
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[test]
    fn test_panic_response_is_generic_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_error_envelope() {
        async fn explode() -> &'static str {
            panic!("order generation exploded")
        }
        let app = with_middleware(Router::new().route("/explode", get(explode)));

        let request = Request::builder().uri("/explode").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"code": 500, "message": "Internal server error"}));
        assert!(body.get("data").is_none());
    }
}
