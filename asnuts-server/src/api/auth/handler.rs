//! Authentication Handlers
//!
//! 注册与登录。角色在注册时由 `OWNER_EMAIL` 决定，之后不可变更。

use axum::{Json, extract::State, http::StatusCode};
use shared::client::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use shared::error::ErrorCode;
use shared::models::{Role, User};

use crate::AppError;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::security_log;
use crate::utils::AppResult;
use crate::utils::password::{hash_password, verify_password};

pub const MIN_PASSWORD_LEN: usize = 6;

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    Ok(state
        .get_jwt_service()
        .generate_token(user.id, &user.email, user.role)?)
}

/// POST /api/register
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();

    if name.is_empty() {
        return Err(AppError::required_field("name"));
    }
    if email.is_empty() {
        return Err(AppError::required_field("email"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("Please enter a valid email address"));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let role = if state.config.is_owner_email(&email) {
        Role::Owner
    } else {
        Role::Customer
    };

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let user = state
        .users()
        .create(name, &email, &password_hash, role)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: UserInfo::from(&user),
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = req.email.trim().to_lowercase();

    let user = state.users().find_by_email(&email).await?;

    // 用户不存在与密码错误返回同一错误
    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => {
            security_log!("WARN", "login_failed", email = email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    security_log!("INFO", "login_success", user_id = user.id, role = user.role.as_str());

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo::from(&user),
    }))
}
