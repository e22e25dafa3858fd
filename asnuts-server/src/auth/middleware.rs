//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 公共路由：无需令牌
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `POST /api/register`, `POST /api/login`
/// - `GET /api/products` (商品目录)
/// - `POST /api/orders` (顾客下单)
pub fn is_public_route(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS || !path.starts_with("/api/") {
        return true;
    }
    match path {
        "/api/register" | "/api/login" | "/api/orders" => method == Method::POST,
        "/api/products" => method == Method::GET,
        _ => false,
    }
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展；角色检查由处理器完成。
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_route(&Method::GET, "/health"));
        assert!(is_public_route(&Method::OPTIONS, "/api/orders"));
        assert!(is_public_route(&Method::POST, "/api/login"));
        assert!(is_public_route(&Method::POST, "/api/register"));
        assert!(is_public_route(&Method::GET, "/api/products"));
        assert!(is_public_route(&Method::POST, "/api/orders"));
    }

    #[test]
    fn test_owner_routes_are_protected() {
        assert!(!is_public_route(&Method::POST, "/api/products"));
        assert!(!is_public_route(&Method::PUT, "/api/products/batham"));
        assert!(!is_public_route(&Method::DELETE, "/api/products/batham"));
        assert!(!is_public_route(&Method::GET, "/api/orders"));
        assert!(!is_public_route(&Method::PUT, "/api/orders/1/status"));
    }
}
