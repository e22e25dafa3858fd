//! Order Model

use crate::cart::{CartLine, SHIPPING};
use crate::models::MAX_PRODUCT_PRICE;
use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 订单来源默认值
pub const DEFAULT_ORDER_SOURCE: &str = "AS Nuts Website";

/// 订单状态
///
/// `pending → completed | cancelled`，由店主触发；终态不可再变更。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed) | (Self::Pending, Self::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 付款方式：货到付款或 UPI 在线支付
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    #[serde(alias = "upi")]
    Online,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cod => "Cash on Delivery",
            Self::Online => "Online Payment (UPI)",
        }
    }
}

/// Order entity
///
/// Immutable snapshot of the cart at submission. Only `status` changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
    pub place: String,
    pub payment_method: PaymentMethod,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<CartLine>,
    pub subtotal: i64,
    pub shipping: i64,
    pub total: i64,
    pub status: OrderStatus,
    pub source: String,
    pub created_at: i64,
}

/// Create order payload (POST /api/orders)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
    pub place: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub subtotal: Option<i64>,
    #[serde(default)]
    pub shipping: Option<i64>,
    pub total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl OrderCreate {
    /// Sum of line totals; `None` when it overflows
    pub fn items_subtotal(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0_i64, |sum, l| sum.checked_add(l.line_total))
    }

    /// Total the payload should carry: items plus flat shipping
    pub fn expected_total(&self) -> Option<i64> {
        self.items_subtotal()?.checked_add(SHIPPING)
    }

    /// Structural checks applied before an order is accepted
    ///
    /// Lines must be positive and self-consistent, and every total the
    /// payload carries must agree with its lines plus flat shipping.
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in self.required_fields() {
            if value.trim().is_empty() {
                return Err(AppError::required_field(field));
            }
        }

        if self.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        for line in &self.items {
            if line.quantity == 0 {
                return Err(AppError::new(ErrorCode::OrderInvalidQuantity)
                    .with_detail("productId", line.product_id.clone()));
            }
            let price_ok = (1..=MAX_PRODUCT_PRICE).contains(&line.unit_price);
            if !price_ok || !line.is_consistent() {
                return Err(AppError::new(ErrorCode::OrderLineMismatch)
                    .with_detail("productId", line.product_id.clone()));
            }
        }

        let (Some(subtotal), Some(expected)) = (self.items_subtotal(), self.expected_total())
        else {
            return Err(
                AppError::new(ErrorCode::OrderTotalMismatch).with_detail("total", self.total)
            );
        };
        let mismatch = self.subtotal.is_some_and(|s| s != subtotal)
            || self.shipping.is_some_and(|s| s != SHIPPING)
            || self.total != expected;
        if mismatch {
            return Err(AppError::new(ErrorCode::OrderTotalMismatch)
                .with_detail("expectedTotal", expected)
                .with_detail("total", self.total));
        }
        Ok(())
    }

    /// Required text fields paired with their wire names
    pub fn required_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("customerName", self.customer_name.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("pincode", self.pincode.as_str()),
            ("place", self.place.as_str()),
        ]
    }
}

/// Owner status update payload (PUT /api/orders/{id}/status)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(Completed.is_terminal());
        assert!(!Pending.is_terminal());
    }

    fn payload() -> OrderCreate {
        OrderCreate {
            customer_name: "Priya".into(),
            phone: "9876543210".into(),
            address: "12 Main St".into(),
            pincode: "600001".into(),
            place: "Chennai".into(),
            payment_method: PaymentMethod::Cod,
            items: vec![CartLine {
                product_id: "batham".into(),
                name: "Batham Cashew Nuts".into(),
                name_tamil: String::new(),
                unit_price: 140,
                quantity: 2,
                line_total: 280,
            }],
            subtotal: Some(280),
            shipping: Some(50),
            total: 330,
            source: None,
        }
    }

    #[test]
    fn test_validate_accepts_consistent_payload() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let mut p = payload();
        p.pincode = " ".into();
        let err = p.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "pincode");
    }

    #[test]
    fn test_validate_rejects_bad_lines_and_totals() {
        let mut empty = payload();
        empty.items.clear();
        assert_eq!(empty.validate().unwrap_err().code, ErrorCode::OrderEmpty);

        let mut zero = payload();
        zero.items[0].quantity = 0;
        zero.items[0].line_total = 0;
        assert_eq!(zero.validate().unwrap_err().code, ErrorCode::OrderInvalidQuantity);

        let mut line = payload();
        line.items[0].line_total = 200;
        assert_eq!(line.validate().unwrap_err().code, ErrorCode::OrderLineMismatch);

        let mut no_shipping = payload();
        no_shipping.total = 280;
        assert_eq!(
            no_shipping.validate().unwrap_err().code,
            ErrorCode::OrderTotalMismatch
        );

        let mut bad_subtotal = payload();
        bad_subtotal.subtotal = Some(300);
        assert_eq!(
            bad_subtotal.validate().unwrap_err().code,
            ErrorCode::OrderTotalMismatch
        );
    }

    #[test]
    fn test_validate_rejects_overflowing_line() {
        // 2^62 * 4 回绕为 0，不能被当作一致的行
        let mut wrapped = payload();
        wrapped.items[0].unit_price = 1 << 62;
        wrapped.items[0].quantity = 4;
        wrapped.items[0].line_total = 0;
        wrapped.subtotal = Some(0);
        wrapped.total = SHIPPING;
        assert_eq!(wrapped.validate().unwrap_err().code, ErrorCode::OrderLineMismatch);

        let mut doubled = payload();
        doubled.items[0].unit_price = i64::MAX / 2 + 1;
        doubled.items[0].quantity = 2;
        doubled.items[0].line_total = i64::MIN;
        assert_eq!(doubled.validate().unwrap_err().code, ErrorCode::OrderLineMismatch);
    }

    #[test]
    fn test_validate_rejects_price_above_cap() {
        let mut p = payload();
        p.items[0].unit_price = MAX_PRODUCT_PRICE + 1;
        p.items[0].quantity = 1;
        p.items[0].line_total = MAX_PRODUCT_PRICE + 1;
        p.subtotal = None;
        p.total = MAX_PRODUCT_PRICE + 1 + SHIPPING;
        assert_eq!(p.validate().unwrap_err().code, ErrorCode::OrderLineMismatch);
    }

    #[test]
    fn test_validate_at_largest_amounts() {
        let mut p = payload();
        p.items[0].unit_price = MAX_PRODUCT_PRICE;
        p.items[0].quantity = u32::MAX;
        p.items[0].line_total = MAX_PRODUCT_PRICE * i64::from(u32::MAX);
        p.subtotal = Some(p.items[0].line_total);
        p.total = p.items[0].line_total + SHIPPING;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_subtotal_overflow_is_total_mismatch() {
        let line = CartLine {
            product_id: "x".into(),
            name: "x".into(),
            name_tamil: String::new(),
            unit_price: MAX_PRODUCT_PRICE,
            quantity: u32::MAX,
            line_total: MAX_PRODUCT_PRICE * i64::from(u32::MAX),
        };
        // 每行合法，但 3000 行累加超出 i64
        let mut p = payload();
        p.items = vec![line; 3000];
        p.subtotal = None;
        p.total = i64::MAX;
        assert_eq!(p.items_subtotal(), None);
        assert_eq!(p.validate().unwrap_err().code, ErrorCode::OrderTotalMismatch);
    }

    #[test]
    fn test_payment_method_accepts_upi_alias() {
        let m: PaymentMethod = serde_json::from_str("\"upi\"").unwrap();
        assert_eq!(m, PaymentMethod::Online);
        let m: PaymentMethod = serde_json::from_str("\"cod\"").unwrap();
        assert_eq!(m, PaymentMethod::Cod);
        assert_eq!(serde_json::to_string(&PaymentMethod::Online).unwrap(), "\"online\"");
    }

    #[test]
    fn test_order_create_ignores_client_status() {
        let json = r#"{
            "customerName": "Priya", "phone": "9876543210", "address": "12 Main St",
            "pincode": "600001", "place": "Chennai", "paymentMethod": "cod",
            "items": [{"productId": "batham", "name": "Batham Cashew Nuts",
                       "unitPrice": 140, "quantity": 2, "lineTotal": 280}],
            "total": 330, "status": "pending"
        }"#;
        let payload: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.items_subtotal(), Some(280));
        assert_eq!(payload.expected_total(), Some(payload.total));
        assert_eq!(payload.required_fields()[4], ("place", "Chennai"));
    }
}
