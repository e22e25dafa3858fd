//! API 路由模块
//!
//! | 模块 | 路由 | 认证 |
//! |------|------|------|
//! | [`health`] | `GET /health` | 无 |
//! | [`auth`] | `POST /api/register`, `POST /api/login` | 无 |
//! | [`products`] | `GET /api/products` 公开；增删改仅店主 | JWT |
//! | [`orders`] | `POST /api/orders` 公开；查询与状态变更仅店主 | JWT |

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::{Router, middleware};
use http::{HeaderValue, Method};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::require_auth;
use crate::core::ServerState;

pub use crate::utils::AppResult;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);
    } else {
        tracing::info!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);
    }

    response
}

/// Build the Axum router (without state or middleware)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(orders::router())
}

/// CORS: 未配置来源时允许全部
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// Build the fully configured application
///
/// 同时用于 HTTP 服务器和测试中的 `oneshot` 调用
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    build_router()
        // JWT 认证中间件 - require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
