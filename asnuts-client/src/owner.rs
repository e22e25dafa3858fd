//! 店主后台
//!
//! 登录要求店主角色；商品和订单的变更都经过 REST API，
//! 成功后同步到本地缓存 ([`keys::PRODUCTS`] / [`keys::ORDERS`])。
//!
//! | 操作 | 接口 | 离线时 |
//! |------|------|--------|
//! | [`OwnerPortal::load_products`] | `GET /api/products` | 本地缓存，其次内置目录 |
//! | [`OwnerPortal::add_product`] | `POST /api/products` | 报错 |
//! | [`OwnerPortal::update_product`] | `PUT /api/products/{id}` | 报错 |
//! | [`OwnerPortal::delete_product`] | `DELETE /api/products/{id}` | 报错，商品保留 |
//! | [`OwnerPortal::load_orders`] | `GET /api/orders` | 本地缓存 |
//! | [`OwnerPortal::update_order_status`] | `PUT /api/orders/{id}/status` | 报错 |

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use shared::client::UserInfo;
use shared::models::{Order, OrderStatus, Product, ProductCreate, ProductUpdate};

use crate::catalog::{CatalogSource, CatalogStore};
use crate::fallback::default_catalog;
use crate::notice::Notice;
use crate::storage::{TabStorage, keys, load_or_default};
use crate::{ClientError, ClientResult, StorefrontApi};

pub const ACCESS_DENIED: &str = "Access denied. Owner account required.";
pub const DUPLICATE_PRODUCT: &str = "A product with this name already exists.";

/// Order history tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Status(OrderStatus),
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => order.status == *status,
        }
    }
}

impl FromStr for OrderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Status(OrderStatus::Pending)),
            "completed" => Ok(Self::Status(OrderStatus::Completed)),
            "cancelled" => Ok(Self::Status(OrderStatus::Cancelled)),
            other => Err(format!("unknown order filter: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSource {
    Remote,
    Cached,
}

/// Outcome of a bulk product save
#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: usize,
    pub failed: Vec<(String, ClientError)>,
}

impl SaveReport {
    pub fn notice(&self) -> Notice {
        if self.failed.is_empty() {
            Notice::success(format!(
                "All {} product changes saved successfully!",
                self.saved
            ))
        } else {
            Notice::error(format!(
                "{} products updated, {} failed.",
                self.saved,
                self.failed.len()
            ))
        }
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Σ order totals
    pub revenue: i64,
    pub product_count: usize,
    /// Distinct phone numbers
    pub unique_customers: usize,
    pub pending_orders: usize,
}

impl fmt::Display for DashboardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} orders, ₹{} revenue, {} products, {} customers, {} pending",
            self.total_orders,
            self.revenue,
            self.product_count,
            self.unique_customers,
            self.pending_orders
        )
    }
}

/// Owner administration state for one tab
pub struct OwnerPortal<A: StorefrontApi> {
    api: A,
    storage: TabStorage,
    user: Option<UserInfo>,
    catalog: CatalogStore,
    orders: Vec<Order>,
}

impl<A: StorefrontApi> OwnerPortal<A> {
    pub fn new(api: A, storage: TabStorage) -> Self {
        Self {
            api,
            storage,
            user: None,
            catalog: CatalogStore::new(),
            orders: Vec::new(),
        }
    }

    // ========== Session ==========

    /// Resume a stored owner session; non-owner sessions are ignored
    pub fn restore_session(&mut self) -> bool {
        let token = self.storage.get_json::<String>(keys::TOKEN).ok().flatten();
        let user = self.storage.get_json::<UserInfo>(keys::USER).ok().flatten();
        match (token, user) {
            (Some(token), Some(user)) if user.role.is_owner() => {
                self.api.set_token(Some(token));
                self.user = Some(user);
                true
            }
            _ => false,
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<&UserInfo> {
        let auth = self.api.login(email, password).await?;
        if !auth.user.role.is_owner() {
            tracing::warn!(email = %auth.user.email, "Owner portal login by non-owner");
            return Err(ClientError::Forbidden(ACCESS_DENIED.to_string()));
        }

        self.storage.set_json(keys::TOKEN, &auth.token)?;
        self.storage.set_json(keys::USER, &auth.user)?;
        self.api.set_token(Some(auth.token));
        tracing::info!(user_id = auth.user.id, "Owner logged in");
        Ok(self.user.insert(auth.user))
    }

    pub fn logout(&mut self) {
        for key in [keys::TOKEN, keys::USER] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to clear session");
            }
        }
        self.api.set_token(None);
        self.user = None;
        self.orders.clear();
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    fn ensure_session(&self) -> ClientResult<()> {
        match self.user {
            Some(_) => Ok(()),
            None => Err(ClientError::Unauthorized),
        }
    }

    // ========== Products ==========

    pub async fn load_products(&mut self) -> ClientResult<CatalogSource> {
        self.ensure_session()?;
        match self.api.list_products().await {
            Ok(products) => {
                self.catalog.replace_all(products);
                Ok(CatalogSource::Remote)
            }
            Err(e) if e.is_auth() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Products unavailable, using local copy");
                if self.catalog.load_cached(&self.storage) {
                    Ok(CatalogSource::Cached)
                } else {
                    self.catalog.replace_all(default_catalog());
                    Ok(CatalogSource::Fallback)
                }
            }
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.catalog.search(term)
    }

    pub async fn add_product(&mut self, form: ProductCreate) -> ClientResult<Product> {
        self.ensure_session()?;
        let id = form
            .validate()
            .map_err(|e| ClientError::Validation(e.message))?;
        if self.catalog.contains(&id) {
            return Err(ClientError::Validation(DUPLICATE_PRODUCT.to_string()));
        }

        let payload = ProductCreate {
            id: Some(id),
            ..form
        };
        let product = self.api.create_product(&payload).await?.product;
        tracing::info!(product_id = %product.id, "Product added");
        self.catalog.upsert(product.clone());
        self.save_catalog();
        Ok(product)
    }

    pub async fn update_product(
        &mut self,
        id: &str,
        changes: ProductUpdate,
    ) -> ClientResult<Product> {
        self.ensure_session()?;
        changes
            .validate()
            .map_err(|e| ClientError::Validation(e.message))?;

        let product = self.api.update_product(id, &changes).await?.product;
        self.catalog.upsert(product.clone());
        self.save_catalog();
        Ok(product)
    }

    /// Save every edit, continuing past failures
    pub async fn save_product_changes(
        &mut self,
        edits: Vec<(String, ProductUpdate)>,
    ) -> SaveReport {
        let mut report = SaveReport::default();
        for (id, changes) in edits {
            match self.update_product(&id, changes).await {
                Ok(_) => report.saved += 1,
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "Product update failed");
                    report.failed.push((id, e));
                }
            }
        }
        report
    }

    /// Delete on the server, then locally
    ///
    /// A product the server no longer has is still removed locally. Past
    /// orders keep their own line snapshots.
    pub async fn delete_product(&mut self, id: &str) -> ClientResult<Product> {
        self.ensure_session()?;
        match self.api.delete_product(id).await {
            Ok(_) => {}
            Err(ClientError::NotFound(message)) => {
                if !self.catalog.contains(id) {
                    return Err(ClientError::NotFound(message));
                }
                tracing::warn!(product_id = %id, "Product already gone on server");
            }
            Err(e) => return Err(e),
        }

        let removed = self
            .catalog
            .remove(id)
            .ok_or_else(|| ClientError::NotFound(format!("Product not found: {id}")))?;
        self.save_catalog();
        Ok(removed)
    }

    fn save_catalog(&self) {
        if let Err(e) = self.catalog.persist(&self.storage) {
            tracing::warn!(error = %e, "Failed to store catalog");
        }
    }

    // ========== Orders ==========

    pub async fn load_orders(&mut self) -> ClientResult<OrderSource> {
        self.ensure_session()?;
        match self.api.list_orders().await {
            Ok(orders) => {
                self.orders = orders;
                if let Err(e) = self.storage.set_json_if_changed(keys::ORDERS, &self.orders) {
                    tracing::warn!(error = %e, "Failed to cache orders");
                }
                Ok(OrderSource::Remote)
            }
            Err(e) if e.is_auth() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Orders unavailable, using cached orders");
                self.orders = load_or_default(&self.storage, keys::ORDERS);
                Ok(OrderSource::Cached)
            }
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn filter_orders(&self, filter: OrderFilter) -> Vec<&Order> {
        self.orders.iter().filter(|o| filter.matches(o)).collect()
    }

    /// Owner status transition; only `status` changes locally
    pub async fn update_order_status(
        &mut self,
        id: i64,
        status: OrderStatus,
    ) -> ClientResult<&Order> {
        self.ensure_session()?;
        let index = self
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Order not found: {id}")))?;

        let current = self.orders[index].status;
        if !current.can_transition_to(status) {
            return Err(ClientError::Validation(format!(
                "Cannot change order from {current} to {status}"
            )));
        }

        let updated = self.api.update_order_status(id, status).await?.order;
        self.orders[index].status = updated.status;
        if let Err(e) = self.storage.set_json(keys::ORDERS, &self.orders) {
            tracing::warn!(error = %e, "Failed to cache orders");
        }
        tracing::info!(order_id = id, status = %updated.status, "Order status updated");
        Ok(&self.orders[index])
    }

    // ========== Cross-tab / dashboard ==========

    /// React to writes from other tabs; an order-key write reloads orders
    pub async fn sync_from_storage(&mut self) -> Vec<Notice> {
        let orders_changed = self
            .storage
            .drain_events()
            .iter()
            .any(|event| event.key == keys::ORDERS);
        if !orders_changed || !self.is_logged_in() {
            return Vec::new();
        }

        if let Err(e) = self.load_orders().await {
            tracing::warn!(error = %e, "Order reload failed");
        }
        vec![Notice::success("New order received!")]
    }

    pub fn stats(&self) -> DashboardStats {
        let unique_customers = self
            .orders
            .iter()
            .map(|o| o.phone.as_str())
            .collect::<HashSet<_>>()
            .len();
        DashboardStats {
            total_orders: self.orders.len(),
            revenue: self.orders.iter().map(|o| o.total).sum(),
            product_count: self.catalog.len(),
            unique_customers,
            pending_orders: self
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
        }
    }
}
