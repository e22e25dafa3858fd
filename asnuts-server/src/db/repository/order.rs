//! Order Repository
//!
//! 订单行以 JSON 数组保存在 `items` 列，插入后不再修改；
//! 只有 `status` 可以更新。

use super::{RepoError, RepoResult};
use shared::cart::SHIPPING;
use shared::models::{DEFAULT_ORDER_SOURCE, Order, OrderCreate, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a validated payload as a new pending order
    pub async fn create(&self, data: &OrderCreate) -> RepoResult<Order> {
        let (subtotal, total) = data
            .items_subtotal()
            .zip(data.expected_total())
            .ok_or_else(|| RepoError::Validation("order amount overflows".to_string()))?;
        let order = Order {
            id: snowflake_id(),
            customer_name: data.customer_name.trim().to_string(),
            phone: data.phone.trim().to_string(),
            address: data.address.trim().to_string(),
            pincode: data.pincode.trim().to_string(),
            place: data.place.trim().to_string(),
            payment_method: data.payment_method,
            items: data.items.clone(),
            subtotal,
            shipping: SHIPPING,
            total,
            status: OrderStatus::Pending,
            source: data
                .source
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ORDER_SOURCE.to_string()),
            created_at: now_millis(),
        };
        let items_json = serde_json::to_string(&order.items)?;

        sqlx::query(
            "INSERT INTO orders
                (id, customer_name, phone, address, pincode, place, payment_method,
                 items, subtotal, shipping, total, status, source, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id)
        .bind(&order.customer_name)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.pincode)
        .bind(&order.place)
        .bind(order.payment_method)
        .bind(items_json)
        .bind(order.subtotal)
        .bind(order.shipping)
        .bind(order.total)
        .bind(order.status)
        .bind(&order.source)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    /// Compare-and-set on `status`: only succeeds while the row still holds `from`
    pub async fn update_status(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> RepoResult<Order> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND status = ?")
            .bind(to)
            .bind(id)
            .bind(from)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::Validation(format!(
                "order {id} is no longer {from}"
            )));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))
    }
}
