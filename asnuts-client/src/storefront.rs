//! 顾客标签页
//!
//! 组合商品目录、购物车和结账；其他标签页写入商品键时重新加载目录。

use shared::cart::CartTotals;
use shared::models::Product;

use crate::cart::CartStore;
use crate::catalog::{CatalogSource, CatalogStore, CategoryFilter};
use crate::checkout::{CheckoutError, CheckoutForm, Submission, submit_order};
use crate::notice::Notice;
use crate::storage::{TabStorage, keys};
use crate::{ClientConfig, ClientResult, StorefrontApi};

pub struct Storefront<A: StorefrontApi> {
    api: A,
    storage: TabStorage,
    config: ClientConfig,
    catalog: CatalogStore,
    cart: CartStore,
    filter: CategoryFilter,
    search: String,
}

impl<A: StorefrontApi> Storefront<A> {
    /// Restores the stored cart; call [`Self::load_catalog`] before shopping
    pub fn new(api: A, storage: TabStorage, config: ClientConfig) -> Self {
        let cart = CartStore::load(&storage);
        Self {
            api,
            storage,
            config,
            catalog: CatalogStore::new(),
            cart,
            filter: CategoryFilter::All,
            search: String::new(),
        }
    }

    pub async fn load_catalog(&mut self) -> CatalogSource {
        self.catalog.load(&self.api, &self.storage).await
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Products visible under the current category tab and search box
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog.render(self.filter, &self.search)
    }

    // ========== Cart ==========

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn add_to_cart(&mut self, product_id: &str, quantity: i64) -> ClientResult<Notice> {
        self.cart.add(&self.catalog, product_id, quantity, &self.storage)
    }

    pub fn increment(&mut self, product_id: &str) -> ClientResult<()> {
        self.cart.increment(product_id, &self.storage)
    }

    pub fn decrement(&mut self, product_id: &str) -> ClientResult<Option<Notice>> {
        self.cart.decrement(product_id, &self.storage)
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> ClientResult<Notice> {
        self.cart.remove(product_id, &self.storage)
    }

    pub async fn checkout(&mut self, form: &CheckoutForm) -> Result<Submission, CheckoutError> {
        submit_order(&self.api, &mut self.cart, &self.storage, form, &self.config).await
    }

    // ========== Cross-tab ==========

    /// Reload the catalog when another tab rewrote the product key
    pub async fn sync_from_storage(&mut self) -> Vec<Notice> {
        let products_changed = self
            .storage
            .drain_events()
            .iter()
            .any(|event| event.key == keys::PRODUCTS);
        if !products_changed {
            return Vec::new();
        }
        self.load_catalog().await;
        vec![Notice::info("Products updated!")]
    }
}
