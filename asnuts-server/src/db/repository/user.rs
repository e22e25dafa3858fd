//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{Role, User};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user; an already registered email yields [`RepoError::Duplicate`]
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> RepoResult<User> {
        let user = User {
            id: snowflake_id(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: now_millis(),
        };

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => RepoError::Duplicate(user.email.clone()),
            other => other,
        })?;

        Ok(user)
    }

    /// Case-insensitive lookup (column uses NOCASE collation)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Replace password hash and role; unknown email yields [`RepoError::NotFound`]
    pub async fn set_credentials(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> RepoResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, role = ? WHERE email = ?")
            .bind(password_hash)
            .bind(role)
            .bind(email)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("user {email}")));
        }
        Ok(())
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
