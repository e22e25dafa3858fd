//! Shared types for the AS Nuts storefront
//!
//! 服务端与客户端共用的领域模型、购物车规则、错误码和 API DTO。
//!
//! # 模块结构
//!
//! | 模块 | 说明 |
//! |------|------|
//! | [`models`] | Product / Order / User 数据模型 |
//! | [`cart`] | 购物车合并与金额计算 |
//! | [`error`] | 统一错误码与 API 错误响应 |
//! | [`client`] | REST 请求/响应 DTO |
//! | [`util`] | 时间戳、ID、slug 工具 |

pub mod cart;
pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartError, CartLine, CartTotals, SHIPPING};
pub use models::{Order, OrderStatus, PaymentMethod, Product, Role, User};
