//! Custom Axum extractors.
//!
//! - `ClientIp`: client address from proxy headers or the connection
//! - `UserAgent`: the `User-Agent` header
//!
//! `ClientIp` and `UserAgent` never reject; an absent value is `None` and
//! the request logger records it as `Unknown`.
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     State(state): State<AppState>,
//!     ClientIp(ip): ClientIp,
//!     UserAgent(user_agent): UserAgent,
//! ) -> Json<Value> {
//!     let meta = RequestMeta::new(user_agent, ip, "/api/getOrder");
//!     // ...
//! }
//! ```

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use std::net::{IpAddr, SocketAddr};

/// Client IP address.
///
/// # Priority
///
/// 1. `X-Forwarded-For` (first IP in the list)
/// 2. `X-Real-IP`
/// 3. Connection peer address (needs `into_make_service_with_connect_info`)
/// 4. `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let connect_info = parts.extensions.get::<ConnectInfo<SocketAddr>>();
        let ip = extract_client_ip(&parts.headers, connect_info);

        Ok(Self(ip.map(|ip| ip.to_string())))
    }
}

/// Extract client IP from headers or connection info.
fn extract_client_ip(headers: &HeaderMap, connect_info: Option<&ConnectInfo<SocketAddr>>) -> Option<IpAddr> {
    let forwarded = headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    let real_ip = || {
        headers
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    forwarded
        .or_else(real_ip)
        .or_else(|| connect_info.map(|ConnectInfo(addr)| addr.ip()))
}

/// User-Agent header, `None` when absent or not valid text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for UserAgent
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        Ok(Self(user_agent))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code can use expect
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract<T>(req: Request<()>) -> T
    where
        T: FromRequestParts<(), Rejection = std::convert::Infallible>,
    {
        let (mut parts, ()) = req.into_parts();
        match T::from_request_parts(&mut parts, &()).await {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn test_client_ip_from_x_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.1, 198.51.100.1")
            .header("X-Real-IP", "198.51.100.42")
            .body(())
            .expect("Valid request");

        let client_ip: ClientIp = extract(req).await;
        assert_eq!(client_ip.0.as_deref(), Some("203.0.113.1"));
    }

    #[tokio::test]
    async fn test_client_ip_from_x_real_ip() {
        let req = Request::builder()
            .header("X-Real-IP", "198.51.100.42")
            .body(())
            .expect("Valid request");

        let client_ip: ClientIp = extract(req).await;
        assert_eq!(client_ip.0.as_deref(), Some("198.51.100.42"));
    }

    #[tokio::test]
    async fn test_client_ip_skips_garbage_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "not-an-ip")
            .header("X-Real-IP", "198.51.100.42")
            .body(())
            .expect("Valid request");

        let client_ip: ClientIp = extract(req).await;
        assert_eq!(client_ip.0.as_deref(), Some("198.51.100.42"));
    }

    #[tokio::test]
    async fn test_client_ip_from_connect_info() {
        let mut req = Request::builder().body(()).expect("Valid request");
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 7], 51_000))));

        let client_ip: ClientIp = extract(req).await;
        assert_eq!(client_ip.0.as_deref(), Some("192.0.2.7"));
    }

    #[tokio::test]
    async fn test_client_ip_missing() {
        let req = Request::builder().body(()).expect("Valid request");

        let client_ip: ClientIp = extract(req).await;
        assert_eq!(client_ip.0, None);
    }

    #[tokio::test]
    async fn test_user_agent_from_header() {
        let req = Request::builder()
            .header(header::USER_AGENT, "Mozilla/5.0 (Test)")
            .body(())
            .expect("Valid request");

        let user_agent: UserAgent = extract(req).await;
        assert_eq!(user_agent.0.as_deref(), Some("Mozilla/5.0 (Test)"));
    }

    #[tokio::test]
    async fn test_user_agent_missing() {
        let req = Request::builder().body(()).expect("Valid request");

        let user_agent: UserAgent = extract(req).await;
        assert_eq!(user_agent.0, None);
    }
}
