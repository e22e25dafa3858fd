//! 持久化购物车
//!
//! 每次变更后写入 [`keys::CART`]；购物车变更不通知其他标签页。

use shared::cart::{Cart, CartError, CartTotals, LineChange};

use crate::catalog::CatalogStore;
use crate::notice::Notice;
use crate::storage::{TabStorage, keys, load_or_default};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Cart,
}

impl CartStore {
    /// Load the stored cart; unreadable data yields an empty cart
    pub fn load(storage: &TabStorage) -> Self {
        Self {
            cart: load_or_default(storage, keys::CART),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.compute_totals()
    }

    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Set the quantity of a catalog product in the cart
    pub fn add(
        &mut self,
        catalog: &CatalogStore,
        product_id: &str,
        quantity: i64,
        storage: &TabStorage,
    ) -> ClientResult<Notice> {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| ClientError::NotFound(format!("Product not found: {product_id}")))?;
        let change = self
            .cart
            .add_or_update_line(product, quantity)
            .map_err(cart_error)?;
        self.save(storage);

        let verb = match change {
            LineChange::Added => "added to",
            _ => "updated in",
        };
        Ok(Notice::success(format!(
            "{quantity} × 50g of {} {verb} cart!",
            product.name
        )))
    }

    pub fn increment(&mut self, product_id: &str, storage: &TabStorage) -> ClientResult<()> {
        self.cart
            .increment_line(product_id)
            .map_err(cart_error)?;
        self.save(storage);
        Ok(())
    }

    /// Decrease by one; returns the removal notice when the line disappears
    pub fn decrement(
        &mut self,
        product_id: &str,
        storage: &TabStorage,
    ) -> ClientResult<Option<Notice>> {
        let change = self
            .cart
            .decrement_line(product_id)
            .map_err(cart_error)?;
        self.save(storage);
        Ok((change == LineChange::Removed).then(|| Notice::info("Item removed from cart.")))
    }

    pub fn remove(&mut self, product_id: &str, storage: &TabStorage) -> ClientResult<Notice> {
        self.cart
            .remove_line(product_id)
            .map_err(cart_error)?;
        self.save(storage);
        Ok(Notice::info("Item removed from cart."))
    }

    pub fn clear(&mut self, storage: &TabStorage) {
        self.cart.clear();
        self.save(storage);
    }

    pub fn persist(&self, storage: &TabStorage) -> ClientResult<()> {
        storage.set_json(keys::CART, &self.cart)
    }

    /// Storage failures leave the in-memory cart authoritative
    fn save(&self, storage: &TabStorage) {
        if let Err(e) = self.persist(storage) {
            tracing::warn!(error = %e, "Failed to save cart");
        }
    }
}

fn cart_error(err: CartError) -> ClientError {
    match err {
        CartError::LineNotFound(_) => ClientError::NotFound(err.to_string()),
        CartError::InvalidQuantity | CartError::AmountOverflow => {
            ClientError::Validation(err.to_string())
        }
    }
}
