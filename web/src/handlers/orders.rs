//! Order endpoints.
//!
//! Both handlers generate first, then audit, then answer. Audit failures are
//! absorbed by the request logger and never change the response.
//!
//! Query strings are read as raw pairs. A repeated key is not an error: the
//! first occurrence wins, so `?count=2&count=3` serves two orders.

use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::extractors::{ClientIp, UserAgent};
use crate::state::AppState;
use axum::extract::{OriginalUri, Query, State};
use order_mock_core::{BatchSize, Order, RequestMeta};

/// Decoded `key=value` pairs in query-string order.
type QueryPairs = Query<Vec<(String, String)>>;

/// First value given for `key`.
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// Generate one order for `id`.
///
/// # Endpoint
///
/// ```text
/// GET /api/getOrder?id=123
/// ```
///
/// # Errors
///
/// 400 when `id` is missing or empty.
pub async fn get_order(
    State(state): State<AppState>,
    Query(pairs): QueryPairs,
    OriginalUri(uri): OriginalUri,
    ClientIp(ip): ClientIp,
    UserAgent(user_agent): UserAgent,
) -> Result<ApiResponse<Order>, AppError> {
    let order_id = first_value(&pairs, "id")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::bad_request("id parameter is required"))?;

    let meta = RequestMeta::new(user_agent, ip, uri.path());
    let order = state.service.get_order(order_id, &meta).await;

    tracing::info!(order_id, items = order.item_count(), "Order generated");

    Ok(ApiResponse::success(order))
}

/// Generate a batch of orders with ids `"1"` through `"count"`.
///
/// Never rejects: a missing or unreadable `count` means the default batch.
///
/// # Endpoint
///
/// ```text
/// GET /api/getOrders?count=5
/// ```
pub async fn get_orders(
    State(state): State<AppState>,
    Query(pairs): QueryPairs,
    OriginalUri(uri): OriginalUri,
    ClientIp(ip): ClientIp,
    UserAgent(user_agent): UserAgent,
) -> ApiResponse<Vec<Order>> {
    let count = BatchSize::parse(first_value(&pairs, "count"));

    let meta = RequestMeta::new(user_agent, ip, uri.path());
    let orders = state.service.get_orders(count, &meta).await;

    tracing::info!(count = count.get(), "Orders generated");

    ApiResponse::success(orders)
}
