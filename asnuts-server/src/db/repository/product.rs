//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All products, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    /// Insert under `id`; an existing id yields [`RepoError::Duplicate`]
    pub async fn create(&self, id: &str, data: &ProductCreate) -> RepoResult<Product> {
        let now = now_millis();
        let product = Product {
            id: id.to_string(),
            name: data.name.trim().to_string(),
            name_tamil: data.name_tamil.trim().to_string(),
            price: data.price,
            description: data.description.trim().to_string(),
            image: data.image.trim().to_string(),
            category: data.category,
            badge: data
                .badge
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(String::from),
            created_at: Some(now),
            updated_at: Some(now),
        };

        sqlx::query(
            "INSERT INTO products
                (id, name, name_tamil, price, description, image, category, badge, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.name_tamil)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.category)
        .bind(&product.badge)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Apply `data` onto the stored product; unknown id yields [`RepoError::NotFound`]
    pub async fn update(&self, id: &str, data: &ProductUpdate) -> RepoResult<Product> {
        let mut product = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("product {id}")))?;

        data.apply_to(&mut product);
        product.updated_at = Some(now_millis());

        sqlx::query(
            "UPDATE products
             SET name = ?, name_tamil = ?, price = ?, description = ?, image = ?,
                 category = ?, badge = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.name_tamil)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.category)
        .bind(&product.badge)
        .bind(product.updated_at)
        .bind(&product.id)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Returns `false` when no row matched
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
