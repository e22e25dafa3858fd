//! Storefront API seam
//!
//! 目录、结账、店主后台只依赖这个 trait；[`crate::HttpClient`] 是网络实现，
//! 测试可替换为内存实现。

use async_trait::async_trait;
use shared::client::{AuthResponse, MessageResponse, OrderResponse, ProductResponse};
use shared::models::{Order, OrderCreate, OrderStatus, Product, ProductCreate, ProductUpdate};

use crate::ClientResult;

#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Token sent as `Authorization: Bearer` on subsequent calls
    fn set_token(&mut self, token: Option<String>);

    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse>;

    async fn list_products(&self) -> ClientResult<Vec<Product>>;

    async fn create_product(&self, product: &ProductCreate) -> ClientResult<ProductResponse>;

    async fn update_product(&self, id: &str, changes: &ProductUpdate)
    -> ClientResult<ProductResponse>;

    async fn delete_product(&self, id: &str) -> ClientResult<MessageResponse>;

    async fn create_order(&self, order: &OrderCreate) -> ClientResult<OrderResponse>;

    async fn list_orders(&self) -> ClientResult<Vec<Order>>;

    async fn update_order_status(&self, id: i64, status: OrderStatus)
    -> ClientResult<OrderResponse>;
}
