//! Data models
//!
//! Shared between asnuts-server and asnuts-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Wire format is camelCase.

pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use order::*;
pub use product::*;
pub use user::*;
