//! 购物车合并规则
//!
//! 购物车是 `product_id → CartLine` 的有序映射。所有变更都保证
//! `line_total == unit_price * quantity`，数量为 0 的行会被移除。
//! 金额全部为整数卢比，运费固定为 [`SHIPPING`]。

use crate::models::Product;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 每单固定运费（卢比）
pub const SHIPPING: i64 = 50;

/// Cart line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(default)]
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub name_tamil: String,
    #[serde(alias = "price")]
    pub unit_price: i64,
    /// Number of 50g units
    pub quantity: u32,
    #[serde(alias = "total")]
    pub line_total: i64,
}

/// `unit_price * quantity`, or [`CartError::AmountOverflow`] when it does not fit in `i64`
pub fn line_amount(unit_price: i64, quantity: u32) -> Result<i64, CartError> {
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or(CartError::AmountOverflow)
}

impl CartLine {
    pub fn new(product: &Product, quantity: u32) -> Result<Self, CartError> {
        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            name_tamil: product.name_tamil.clone(),
            unit_price: product.price,
            quantity,
            line_total: line_amount(product.price, quantity)?,
        })
    }

    /// Whether `line_total` agrees with `unit_price * quantity`
    pub fn is_consistent(&self) -> bool {
        self.quantity > 0
            && line_amount(self.unit_price, self.quantity).is_ok_and(|t| t == self.line_total)
    }

    /// The line is untouched when the new total would overflow
    fn set_quantity(&mut self, quantity: u32) -> Result<(), CartError> {
        self.line_total = line_amount(self.unit_price, quantity)?;
        self.quantity = quantity;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: i64,
    pub shipping: i64,
    pub total: i64,
    /// Sum of quantities
    pub item_count: u32,
}

/// Outcome of [`Cart::add_or_update_line`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Added,
    Updated,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Please select a quantity greater than 0.")]
    InvalidQuantity,

    #[error("Item not found in cart: {0}")]
    LineNotFound(String),

    #[error("Cart amount is too large.")]
    AmountOverflow,
}

/// Ordered mapping product id → cart line
///
/// Persisted as a JSON object keyed by product id. Loading normalizes the
/// stored lines (key wins over `productId`, totals recomputed, empty lines
/// dropped) so older documents stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, CartLine>", into = "IndexMap<String, CartLine>")]
pub struct Cart {
    lines: IndexMap<String, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line for `product` to `quantity`, creating it when absent
    ///
    /// The unit price is refreshed from the product. `quantity <= 0` is
    /// rejected and leaves the cart untouched.
    pub fn add_or_update_line(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> Result<LineChange, CartError> {
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(CartError::InvalidQuantity)?;

        let line = CartLine::new(product, quantity)?;
        match self.lines.insert(product.id.clone(), line) {
            Some(_) => Ok(LineChange::Updated),
            None => Ok(LineChange::Added),
        }
    }

    pub fn increment_line(&mut self, product_id: &str) -> Result<LineChange, CartError> {
        let line = self.line_mut(product_id)?;
        let next = line
            .quantity
            .checked_add(1)
            .ok_or(CartError::AmountOverflow)?;
        line.set_quantity(next)?;
        Ok(LineChange::Updated)
    }

    /// Decrease by one; a quantity-1 line is removed
    pub fn decrement_line(&mut self, product_id: &str) -> Result<LineChange, CartError> {
        let line = self.line_mut(product_id)?;
        if line.quantity <= 1 {
            self.lines.shift_remove(product_id);
            return Ok(LineChange::Removed);
        }
        line.set_quantity(line.quantity - 1)?;
        Ok(LineChange::Updated)
    }

    pub fn remove_line(&mut self, product_id: &str) -> Result<CartLine, CartError> {
        self.lines
            .shift_remove(product_id)
            .ok_or_else(|| CartError::LineNotFound(product_id.to_string()))
    }

    /// Sums saturate; a saturated cart is rejected when submitted as an order
    pub fn compute_totals(&self) -> CartTotals {
        let (subtotal, item_count) = self
            .lines
            .values()
            .fold((0_i64, 0_u32), |(sum, count), line| {
                (
                    sum.saturating_add(line.line_total),
                    count.saturating_add(line.quantity),
                )
            });
        CartTotals {
            subtotal,
            shipping: SHIPPING,
            total: subtotal.saturating_add(SHIPPING),
            item_count,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.compute_totals().item_count
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    /// Lines in insertion order
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, product_id: &str) -> Result<&mut CartLine, CartError> {
        self.lines
            .get_mut(product_id)
            .ok_or_else(|| CartError::LineNotFound(product_id.to_string()))
    }
}

impl From<IndexMap<String, CartLine>> for Cart {
    fn from(stored: IndexMap<String, CartLine>) -> Self {
        let lines = stored
            .into_iter()
            .filter(|(_, line)| line.quantity > 0)
            .filter_map(|(id, mut line)| {
                line.product_id = id.clone();
                line.set_quantity(line.quantity).ok()?;
                Some((id, line))
            })
            .collect();
        Self { lines }
    }
}

impl From<Cart> for IndexMap<String, CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("{id} name"),
            name_tamil: String::new(),
            price,
            description: String::new(),
            image: String::new(),
            category: ProductCategory::Cashews,
            badge: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_two_product_totals() {
        let mut cart = Cart::new();
        cart.add_or_update_line(&product("batham", 140), 2).unwrap();
        let totals = cart.compute_totals();
        assert_eq!(totals.subtotal, 280);
        assert_eq!(totals.total, 330);

        cart.add_or_update_line(&product("w180", 160), 1).unwrap();
        let totals = cart.compute_totals();
        assert_eq!(totals.subtotal, 440);
        assert_eq!(totals.total, 490);
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn test_subtotal_is_price_times_quantity() {
        for q in [1_i64, 2, 7, 40, 999] {
            let mut cart = Cart::new();
            cart.add_or_update_line(&product("kaju", 130), q).unwrap();
            let totals = cart.compute_totals();
            assert_eq!(totals.subtotal, 130 * q);
            assert_eq!(totals.total, totals.subtotal + SHIPPING);
        }
    }

    #[test]
    fn test_non_positive_quantity_rejected_without_change() {
        let mut cart = Cart::new();
        cart.add_or_update_line(&product("pista", 160), 3).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.add_or_update_line(&product("pista", 160), 0),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(
            cart.add_or_update_line(&product("dates", 80), -2),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_overwrites_quantity_and_refreshes_price() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_or_update_line(&product("badam", 120), 5),
            Ok(LineChange::Added)
        );
        assert_eq!(
            cart.add_or_update_line(&product("badam", 125), 2),
            Ok(LineChange::Updated)
        );
        let line = cart.get("badam").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, 125);
        assert_eq!(line.line_total, 250);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_decrement_quantity_one_removes_line() {
        let mut cart = Cart::new();
        cart.add_or_update_line(&product("chia", 90), 1).unwrap();
        assert_eq!(cart.decrement_line("chia"), Ok(LineChange::Removed));
        assert!(cart.is_empty());
        assert_eq!(cart.compute_totals().total, SHIPPING);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new();
        cart.add_or_update_line(&product("anjeer", 110), 2).unwrap();
        cart.increment_line("anjeer").unwrap();
        assert_eq!(cart.get("anjeer").unwrap().line_total, 330);
        cart.decrement_line("anjeer").unwrap();
        assert_eq!(cart.get("anjeer").unwrap().quantity, 2);
        assert!(matches!(
            cart.increment_line("missing"),
            Err(CartError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_remove_line_and_insertion_order() {
        let mut cart = Cart::new();
        for (id, price) in [("w240", 140), ("akhrot", 110), ("prune", 75)] {
            cart.add_or_update_line(&product(id, price), 1).unwrap();
        }
        cart.remove_line("akhrot").unwrap();
        let ids: Vec<_> = cart.lines().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["w240", "prune"]);
        assert!(cart.remove_line("akhrot").is_err());
    }

    #[test]
    fn test_stored_cart_is_normalized_on_load() {
        // 旧格式：键为商品 ID，字段为 price/total
        let json = r#"{
            "batham": {"name": "Batham Cashew Nuts", "price": 140, "quantity": 2, "total": 999},
            "ghost": {"name": "Ghost", "price": 10, "quantity": 0, "total": 0}
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 1);
        let line = cart.get("batham").unwrap();
        assert_eq!(line.product_id, "batham");
        assert_eq!(line.line_total, 280);
    }

    #[test]
    fn test_line_consistency() {
        let mut line = CartLine::new(&product("kishmish", 60), 3).unwrap();
        assert!(line.is_consistent());
        line.line_total = 100;
        assert!(!line.is_consistent());
    }

    #[test]
    fn test_overflowing_line_rejected_without_change() {
        let mut cart = Cart::new();
        cart.add_or_update_line(&product("w180", 160), 1).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.add_or_update_line(&product("w180", i64::MAX / 2 + 1), 2),
            Err(CartError::AmountOverflow)
        );
        assert_eq!(
            cart.add_or_update_line(&product("gold", i64::MAX), i64::from(u32::MAX)),
            Err(CartError::AmountOverflow)
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_large_amounts_stay_consistent() {
        let mut cart = Cart::new();
        let price = 1_000_000;
        let quantity = i64::from(u32::MAX) - 1;
        cart.add_or_update_line(&product("saffron", price), quantity).unwrap();
        cart.increment_line("saffron").unwrap();

        let line = cart.get("saffron").unwrap();
        assert_eq!(line.quantity, u32::MAX);
        assert_eq!(line.line_total, price * i64::from(u32::MAX));
        assert!(line.is_consistent());

        // 数量已到 u32 上限
        assert_eq!(cart.increment_line("saffron"), Err(CartError::AmountOverflow));
        assert_eq!(cart.get("saffron").unwrap().quantity, u32::MAX);
        assert_eq!(cart.compute_totals().total, price * i64::from(u32::MAX) + SHIPPING);
    }

    #[test]
    fn test_wrapped_line_total_is_inconsistent() {
        // 2^62 * 4 在 i64 中回绕为 0
        let line = CartLine {
            product_id: "x".into(),
            name: "x".into(),
            name_tamil: String::new(),
            unit_price: 1 << 62,
            quantity: 4,
            line_total: 0,
        };
        assert!(!line.is_consistent());
    }

    #[test]
    fn test_totals_saturate_across_lines() {
        let mut cart = Cart::new();
        cart.add_or_update_line(&product("a", i64::MAX / 2), 1).unwrap();
        cart.add_or_update_line(&product("b", i64::MAX / 2), 1).unwrap();
        cart.add_or_update_line(&product("c", i64::MAX / 2), 1).unwrap();
        let totals = cart.compute_totals();
        assert_eq!(totals.subtotal, i64::MAX);
        assert_eq!(totals.total, i64::MAX);
    }

    #[test]
    fn test_stored_overflowing_line_is_dropped_on_load() {
        let json = format!(
            r#"{{"huge": {{"name": "Huge", "price": {}, "quantity": 3, "total": 0}}}}"#,
            i64::MAX / 2
        );
        let cart: Cart = serde_json::from_str(&json).unwrap();
        assert!(cart.is_empty());
    }
}
