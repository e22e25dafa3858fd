//! 下单提交
//!
//! 购物车快照 + 顾客表单 → `OrderCreate` → `POST /api/orders`。
//! 成功后清空购物车；失败时购物车保持不变，不重试。

use shared::models::{Order, OrderCreate, PaymentMethod};
use thiserror::Error;

use crate::cart::CartStore;
use crate::notice::Notice;
use crate::storage::TabStorage;
use crate::{ClientConfig, ClientError, StorefrontApi};

pub const EMPTY_CART_MESSAGE: &str =
    "Your cart is empty. Add some premium Panruti products first!";

/// Customer details entered at checkout
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
    pub place: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// First required field left blank
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.customer_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("pincode", &self.pincode),
            ("place", &self.place),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// Payment-specific confirmation shown after the order is accepted
    pub fn confirmation(&self, shop_name: &str) -> Notice {
        match self.payment_method {
            PaymentMethod::Cod => Notice::success(format!(
                "Order placed successfully, {}! Your order will be delivered to {}. \
                 We will contact you on {}. Payment: Cash on Delivery",
                self.customer_name.trim(),
                self.place.trim(),
                self.phone.trim()
            )),
            PaymentMethod::Online => Notice::success(format!(
                "Order confirmed! Payment details received. Thank you for choosing {shop_name}!"
            )),
        }
    }

    fn to_payload(&self, cart: &CartStore) -> OrderCreate {
        let totals = cart.totals();
        OrderCreate {
            customer_name: self.customer_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
            place: self.place.trim().to_string(),
            payment_method: self.payment_method,
            items: cart.cart().lines().cloned().collect(),
            subtotal: Some(totals.subtotal),
            shipping: Some(totals.shipping),
            total: totals.total,
            source: None,
        }
    }
}

/// Accepted order and the confirmation to display
#[derive(Debug, Clone)]
pub struct Submission {
    pub order: Order,
    pub notice: Notice,
}

/// Rejected or failed submission; the cart is unchanged
#[derive(Debug, Error)]
#[error("{error}")]
pub struct CheckoutError {
    #[source]
    pub error: ClientError,
    pub notice: Notice,
}

impl CheckoutError {
    fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            notice: Notice::error(message.clone()),
            error: ClientError::Validation(message),
        }
    }
}

/// Submit the current cart as an order
///
/// An empty cart or a blank required field is rejected before any network
/// call.
pub async fn submit_order(
    api: &dyn StorefrontApi,
    cart: &mut CartStore,
    storage: &TabStorage,
    form: &CheckoutForm,
    config: &ClientConfig,
) -> Result<Submission, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::validation(EMPTY_CART_MESSAGE));
    }
    if let Some(field) = form.missing_field() {
        return Err(CheckoutError::validation(format!(
            "Please enter your {field}."
        )));
    }

    let payload = form.to_payload(cart);
    match api.create_order(&payload).await {
        Ok(response) => {
            tracing::info!(
                order_id = response.order.id,
                total = response.order.total,
                "Order submitted"
            );
            cart.clear(storage);
            Ok(Submission {
                order: response.order,
                notice: form.confirmation(&config.shop_name),
            })
        }
        Err(error) => {
            tracing::warn!(error = %error, "Order submission failed");
            Err(CheckoutError {
                error,
                notice: Notice::error(format!(
                    "Failed to place order. Please call us directly at {}",
                    config.support_phone
                )),
            })
        }
    }
}
