//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::{MessageResponse, ProductResponse};
use shared::error::ErrorCode;
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::utils::AppResult;

fn product_not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("id", id)
}

/// GET /api/products - 商品目录，最新的在前
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.products().find_all().await?;
    Ok(Json(products))
}

/// POST /api/products - 新增商品 (店主)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    user.ensure_owner("Only owners can add products")?;
    let id = payload.validate()?;

    let product = state
        .products()
        .create(&id, &payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::new(ErrorCode::ProductAlreadyExists).with_detail("id", id.clone())
            }
            other => other.into(),
        })?;

    tracing::info!(product_id = %product.id, owner = user.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product added successfully".to_string(),
            product,
        }),
    ))
}

/// PUT /api/products/{id} - 更新商品 (店主)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductResponse>> {
    user.ensure_owner("Only owners can update products")?;
    payload.validate()?;

    let product = state
        .products()
        .update(&id, &payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => product_not_found(&id),
            other => other.into(),
        })?;

    tracing::info!(product_id = %product.id, owner = user.id, "Product updated");

    Ok(Json(ProductResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// DELETE /api/products/{id} - 删除商品 (店主)
///
/// 历史订单保存的是商品快照，不受影响。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    user.ensure_owner("Only owners can delete products")?;

    if !state.products().delete(&id).await? {
        return Err(product_not_found(&id));
    }

    tracing::info!(product_id = %id, owner = user.id, "Product deleted");

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
