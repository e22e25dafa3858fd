//! Product Model

use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::{is_slug, slugify};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 单价上限（卢比 / 50g），保证金额运算不会溢出 `i64`
pub const MAX_PRODUCT_PRICE: i64 = 1_000_000;

fn validate_price(price: i64) -> AppResult<()> {
    if price <= 0 {
        return Err(AppError::new(ErrorCode::ProductInvalidPrice).with_detail("field", "price"));
    }
    if price > MAX_PRODUCT_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("Price must not exceed {MAX_PRODUCT_PRICE}"),
        )
        .with_detail("field", "price"));
    }
    Ok(())
}

/// 商品分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Cashews,
    Nuts,
    Dryfruits,
    Seeds,
    Premium,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        Self::Cashews,
        Self::Nuts,
        Self::Dryfruits,
        Self::Seeds,
        Self::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cashews => "cashews",
            Self::Nuts => "nuts",
            Self::Dryfruits => "dryfruits",
            Self::Seeds => "seeds",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Product entity
///
/// `id` 是商品名的 slug；`price` 为每 50g 单位的整数卢比。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_tamil: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category: ProductCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Product {
    /// Case-insensitive substring match over name, description and Tamil name
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.name_tamil.to_lowercase().contains(&term)
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    /// Defaults to the slug of `name` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub name_tamil: String,
    pub price: i64,
    pub description: String,
    pub image: String,
    pub category: ProductCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl ProductCreate {
    /// Check required fields and price, returning the id the product will be stored under
    pub fn validate(&self) -> AppResult<String> {
        let required = [
            ("name", self.name.as_str()),
            ("description", self.description.as_str()),
            ("image", self.image.as_str()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Please fill in all required fields (name, price, description, image).",
            )
            .with_detail("field", *field));
        }
        validate_price(self.price)?;

        let id = match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                if !is_slug(id) {
                    return Err(AppError::validation(
                        "Product id may only contain lowercase letters, digits and '-'",
                    )
                    .with_detail("field", "id"));
                }
                id.to_string()
            }
            _ => slugify(self.name.trim()),
        };
        if id.trim_matches('-').is_empty() {
            return Err(AppError::validation(
                "Product name must contain letters or digits",
            ));
        }
        Ok(id)
    }
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_tamil: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl ProductUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(AppError::required_field("name"));
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Apply the present fields onto `product`; `id` never changes
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(name_tamil) = &self.name_tamil {
            product.name_tamil = name_tamil.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(image) = &self.image {
            product.image = image.clone();
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(badge) = &self.badge {
            // 空字符串表示清除角标
            product.badge = if badge.trim().is_empty() {
                None
            } else {
                Some(badge.clone())
            };
        }
    }
}

impl From<&Product> for ProductUpdate {
    fn from(p: &Product) -> Self {
        Self {
            name: Some(p.name.clone()),
            name_tamil: Some(p.name_tamil.clone()),
            price: Some(p.price),
            description: Some(p.description.clone()),
            image: Some(p.image.clone()),
            category: Some(p.category),
            badge: Some(p.badge.clone().unwrap_or_default()),
        }
    }
}
