use std::sync::Arc;

use shared::models::Role;

use crate::AppError;
use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::utils::password::hash_password;

const OWNER_NAME: &str = "AS Nuts Owner";

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池实现浅拷贝，每个请求处理器拿到的是同一组服务。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let state = Self::new(config.clone(), db);
        state.seed_owner().await?;
        Ok(state)
    }

    /// 基于内存数据库的状态，供测试使用
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        let state = Self::new(config, db);
        state.seed_owner().await?;
        Ok(state)
    }

    /// 配置了 `OWNER_PASSWORD` 时确保店主账号存在，并重置其密码和角色
    pub async fn seed_owner(&self) -> Result<()> {
        let email = &self.config.owner_email;
        let Some(password) = self.config.owner_password.as_deref() else {
            tracing::warn!(
                email = %email,
                "OWNER_PASSWORD not set, first registration with the owner email becomes the owner"
            );
            return Ok(());
        };

        let hash = hash_password(password)
            .map_err(|e| ServerError::Config(format!("Failed to hash owner password: {e}")))?;
        let users = self.users();
        if users
            .find_by_email(email)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            users
                .set_credentials(email, &hash, Role::Owner)
                .await
                .map_err(AppError::from)?;
            tracing::info!(email = %email, "Owner account credentials refreshed");
        } else {
            users
                .create(OWNER_NAME, email, &hash, Role::Owner)
                .await
                .map_err(AppError::from)?;
            tracing::info!(email = %email, "Owner account created");
        }
        Ok(())
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.db.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.pool.clone())
    }
}
