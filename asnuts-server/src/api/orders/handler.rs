//! Order API Handlers
//!
//! 下单对所有人开放；订单列表和状态变更仅限店主。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::OrderResponse;
use shared::error::ErrorCode;
use shared::models::{Order, OrderCreate, OrderStatusUpdate};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::utils::AppResult;

/// POST /api/orders - 顾客下单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    payload.validate()?;

    let order = state.orders().create(&payload).await?;

    tracing::info!(
        order_id = order.id,
        total = order.total,
        payment = ?order.payment_method,
        lines = order.items.len(),
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            message: "Order placed successfully".to_string(),
            order,
        }),
    ))
}

/// GET /api/orders - 订单列表，最新的在前 (店主)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    user.ensure_owner("Only owners can view orders")?;
    let orders = state.orders().find_all().await?;
    Ok(Json(orders))
}

/// PUT /api/orders/{id}/status - 店主变更订单状态
///
/// 只允许 `pending → completed | cancelled`，其余返回 409。
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderResponse>> {
    user.ensure_owner("Only owners can update orders")?;

    let repo = state.orders();
    let current = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?;

    let invalid_transition = || {
        AppError::with_message(
            ErrorCode::OrderInvalidTransition,
            format!("Cannot change order from {} to {}", current.status, payload.status),
        )
        .with_detail("id", id)
    };

    if !current.status.can_transition_to(payload.status) {
        return Err(invalid_transition());
    }

    let order = repo
        .update_status(id, current.status, payload.status)
        .await
        .map_err(|e| match e {
            RepoError::Validation(_) => invalid_transition(),
            other => other.into(),
        })?;

    tracing::info!(order_id = id, status = %order.status, owner = user.id, "Order status updated");

    Ok(Json(OrderResponse {
        message: format!("Order marked as {}", order.status),
        order,
    }))
}
