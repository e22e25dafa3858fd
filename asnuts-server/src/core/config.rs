use crate::auth::JwtConfig;
use std::path::PathBuf;

pub const DEFAULT_WORK_DIR: &str = "./data";
pub const DEFAULT_OWNER_EMAIL: &str = "owner@asnuts.com";

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/database/asnuts.db | SQLite 文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | OWNER_EMAIL | owner@asnuts.com | 店主邮箱 |
/// | OWNER_PASSWORD | (空) | 启动时创建店主账号；未设置时首个以店主邮箱注册者成为店主 |
/// | CORS_ORIGINS | (空 = 允许全部) | 逗号分隔的允许来源 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭等待时间 |
///
/// JWT 相关变量见 [`JwtConfig`]。
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放数据库和日志
    pub work_dir: String,
    pub http_port: u16,
    pub database_path: String,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// 店主邮箱 (小写)
    pub owner_email: String,
    /// 启动时写入的店主密码
    pub owner_password: Option<String>,
    pub cors_origins: Vec<String>,
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| DEFAULT_WORK_DIR.into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("database")
                .join("asnuts.db")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            owner_email: std::env::var("OWNER_EMAIL")
                .unwrap_or_else(|_| DEFAULT_OWNER_EMAIL.into())
                .trim()
                .to_lowercase(),
            owner_password: std::env::var("OWNER_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            work_dir,
        }
    }

    /// 测试用配置：固定 JWT 密钥，不读取端口/数据库环境变量
    pub fn for_tests(owner_email: impl Into<String>) -> Self {
        Self {
            work_dir: DEFAULT_WORK_DIR.into(),
            http_port: 0,
            database_path: ":memory:".into(),
            jwt: JwtConfig {
                secret: "test-secret-key-that-is-at-least-32-chars".into(),
                expiration_minutes: 60,
                issuer: "asnuts-server".into(),
                audience: "asnuts-clients".into(),
            },
            environment: "test".into(),
            owner_email: owner_email.into().to_lowercase(),
            owner_password: None,
            cors_origins: Vec::new(),
            shutdown_timeout_ms: 1000,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 该邮箱注册时是否获得店主角色
    pub fn is_owner_email(&self, email: &str) -> bool {
        email.trim().eq_ignore_ascii_case(&self.owner_email)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
