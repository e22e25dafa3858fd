//! 商品目录缓存
//!
//! 从 `GET /api/products` 加载；接口不可用时使用内置目录
//! ([`crate::fallback`]) 并写入本地存储。

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use shared::models::{Product, ProductCategory};

use crate::fallback::default_catalog;
use crate::notice::Notice;
use crate::storage::{TabStorage, keys};
use crate::{ClientResult, StorefrontApi};

/// Category tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProductCategory),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Where the current catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Remote,
    /// Last catalog persisted locally
    Cached,
    /// Built-in default catalog
    Fallback,
}

impl CatalogSource {
    pub fn is_offline(&self) -> bool {
        !matches!(self, Self::Remote)
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::Remote => Notice::info("Products loaded from database!"),
            Self::Cached | Self::Fallback => {
                Notice::error("Using offline products. Some items may not be current.")
            }
        }
    }
}

/// Ordered mapping product id → product
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: IndexMap<String, Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        let mut store = Self::new();
        store.replace_all(products);
        store
    }

    /// Replace the whole map, keeping the given order
    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.products = products.into_iter().map(|p| (p.id.clone(), p)).collect();
    }

    /// Hydrate from the API, falling back to the built-in catalog
    pub async fn load(&mut self, api: &dyn StorefrontApi, storage: &TabStorage) -> CatalogSource {
        match api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Catalog loaded from server");
                self.replace_all(products);
                CatalogSource::Remote
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog unavailable, using built-in products");
                self.replace_all(default_catalog());
                if let Err(e) = self.persist_if_changed(storage) {
                    tracing::warn!(error = %e, "Failed to store fallback catalog");
                }
                CatalogSource::Fallback
            }
        }
    }

    /// Load the locally persisted catalog; `false` when nothing usable is stored
    pub fn load_cached(&mut self, storage: &TabStorage) -> bool {
        match storage.get_json::<Vec<Product>>(keys::PRODUCTS) {
            Ok(Some(products)) if !products.is_empty() => {
                self.replace_all(products);
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Stored catalog unreadable");
                false
            }
        }
    }

    /// Write the catalog under the product key, notifying other tabs
    pub fn persist(&self, storage: &TabStorage) -> ClientResult<()> {
        let products: Vec<&Product> = self.products.values().collect();
        storage.set_json(keys::PRODUCTS, &products)
    }

    /// Like [`Self::persist`], skipped when the stored document is identical
    pub fn persist_if_changed(&self, storage: &TabStorage) -> ClientResult<bool> {
        let products: Vec<&Product> = self.products.values().collect();
        storage.set_json_if_changed(keys::PRODUCTS, &products)
    }

    /// Products in the category whose name, description or Tamil name contains `search`
    pub fn render(&self, filter: CategoryFilter, search: &str) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| filter.matches(p) && p.matches_search(search))
            .collect()
    }

    /// Search across all categories
    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.render(CategoryFilter::All, term)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }

    /// Insert or replace; a new product goes first (newest first)
    pub fn upsert(&mut self, product: Product) {
        if let Some(existing) = self.products.get_mut(&product.id) {
            *existing = product;
        } else {
            self.products.shift_insert(0, product.id.clone(), product);
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Product> {
        self.products.shift_remove(id)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
