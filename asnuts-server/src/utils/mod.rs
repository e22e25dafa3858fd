//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 错误响应结构 (from shared::error)
//! - 日志、密码哈希

pub mod logger;
pub mod password;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
