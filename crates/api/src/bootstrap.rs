//! First-start seeding of the administrator account.

use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::roles::ROLE_ADMIN;
use tathya_db::models::user::{CreateUser, UserResponse};
use tathya_db::repositories::UserRepo;
use tathya_db::DbPool;

use crate::activity;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Create the configured admin when no users exist yet.
///
/// Returns the new user, or `None` when users already exist or no
/// credentials are configured.
pub async fn seed_admin(pool: &DbPool, config: &ServerConfig) -> AppResult<Option<UserResponse>> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password)
    else {
        return Ok(None);
    };
    if UserRepo::count(pool).await? > 0 {
        return Ok(None);
    }

    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::BadRequest)?;
    let password_hash =
        hash_password(password).map_err(|e| AppError::InternalError(e.to_string()))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.clone(),
            email: format!("{username}@localhost"),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    activity::audit_as(
        pool,
        Some(user.id),
        "system",
        None,
        action_types::USER_CREATE,
        json!({ "username": user.username, "role": user.role, "bootstrap": true }),
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");

    Ok(Some(UserResponse::from(user)))
}
