//! AS Nuts Server - 干果店铺 REST API
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SQLite (users / products / orders)
//! - **认证** (`auth`): JWT + Argon2，店主角色由注册邮箱决定
//! - **HTTP API** (`api`): 商品目录、下单、店主管理接口
//!
//! # 模块结构
//!
//! ```text
//! asnuts-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、当前用户
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 日志、密码哈希、错误类型
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 进程启动准备：加载 .env、创建工作目录、初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir =
        std::env::var("WORK_DIR").unwrap_or_else(|_| core::config::DEFAULT_WORK_DIR.into());
    std::fs::create_dir_all(std::path::Path::new(&work_dir).join("database"))?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___   _____    _   __      __
   /   | / ___/   / | / /_  __/ /______
  / /| | \__ \   /  |/ / / / / __/ ___/
 / ___ |___/ /  / /|  / /_/ / /_(__  )
/_/  |_/____/  /_/ |_/\__,_/\__/____/
    "#
    );
}
