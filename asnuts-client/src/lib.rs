//! AS Nuts Client - 店铺前端应用状态
//!
//! 顾客页面和店主后台共用的客户端逻辑，通过 REST API 与服务器通信，
//! 并把商品、购物车、订单缓存到本地持久化存储。
//!
//! # 模块结构
//!
//! | 模块 | 说明 |
//! |------|------|
//! | [`http`] | REST API 客户端 ([`StorefrontApi`] 的网络实现) |
//! | [`storage`] | 本地键值存储和跨标签页变更事件 |
//! | [`catalog`] | 商品目录缓存和离线回退 |
//! | [`cart`] | 持久化购物车 |
//! | [`checkout`] | 下单提交 |
//! | [`owner`] | 店主后台 |
//! | [`storefront`] | 顾客标签页 |

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fallback;
pub mod http;
pub mod notice;
pub mod owner;
pub mod storage;
pub mod storefront;

pub use api::StorefrontApi;
pub use cart::CartStore;
pub use catalog::{CatalogSource, CatalogStore, CategoryFilter};
pub use checkout::{CheckoutError, CheckoutForm, Submission, submit_order};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use notice::{Notice, NoticeKind};
pub use owner::{DashboardStats, OrderFilter, OrderSource, OwnerPortal, SaveReport};
pub use storage::{
    FileStorage, MemoryStorage, SharedStorage, StorageBackend, StorageEvent, TabStorage,
};
pub use storefront::Storefront;

// Re-export shared types for convenience
pub use shared::client::{AuthResponse, UserInfo};
