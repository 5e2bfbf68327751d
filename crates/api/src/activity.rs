//! Side effects shared by mutating handlers: loading a case, appending a
//! typed comment, writing the audit trail and changing status.

use serde_json::json;
use sqlx::SqliteConnection;
use tathya_core::error::CoreError;
use tathya_core::types::DbId;
use tathya_core::workflow::CaseStatus;
use tathya_db::models::audit::CreateAuditLog;
use tathya_db::models::case::Case;
use tathya_db::models::comment::{CaseComment, CreateComment};
use tathya_db::repositories::{AuditLogRepo, CaseRepo, CommentRepo};
use tathya_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Fetch a case by its public id or fail with 404.
pub async fn load_case(pool: &DbPool, case_id: &str) -> AppResult<Case> {
    CaseRepo::find_by_case_id(pool, case_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::CaseNotFound(case_id.to_string())))
}

pub async fn add_comment(
    pool: &DbPool,
    case_id: &str,
    comment_type: &str,
    comment: String,
    author: &str,
) -> AppResult<CaseComment> {
    let input = CreateComment {
        case_id: case_id.to_string(),
        comment_type: comment_type.to_string(),
        comment,
        created_by: author.to_string(),
    };
    Ok(CommentRepo::create(pool, &input).await?)
}

/// Append an audit entry attributed to `user`.
pub async fn audit(
    pool: &DbPool,
    user: &AuthUser,
    case_id: Option<&str>,
    action_type: &str,
    details: serde_json::Value,
) -> AppResult<()> {
    audit_as(pool, Some(user.user_id), &user.username, case_id, action_type, details).await
}

/// Append an audit entry for an actor that may not be authenticated yet
/// (failed logins).
pub async fn audit_as(
    pool: &DbPool,
    user_id: Option<DbId>,
    username: &str,
    case_id: Option<&str>,
    action_type: &str,
    details: serde_json::Value,
) -> AppResult<()> {
    let entry = CreateAuditLog {
        case_id: case_id.map(str::to_string),
        user_id,
        username: username.to_string(),
        action_type: action_type.to_string(),
        details_json: details,
    };
    AuditLogRepo::append(pool, &entry).await?;
    Ok(())
}

/// A status write with the comment and audit entry that accompany it.
pub struct StatusChange<'a> {
    pub status: CaseStatus,
    pub comment_type: &'a str,
    pub comment: String,
    pub action_type: &'a str,
    pub details: serde_json::Value,
}

/// Write the new status, its comment and an audit entry carrying the previous
/// and new status in one write transaction.
pub async fn change_status(
    pool: &DbPool,
    user: &AuthUser,
    case: &Case,
    change: StatusChange<'_>,
) -> AppResult<Case> {
    let status = change.status;
    let mut tx = tathya_db::begin_write(pool).await?;
    let updated = CaseRepo::update_status(&mut *tx, &case.case_id, status.as_str())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::CaseNotFound(case.case_id.clone())))?;
    record_change(&mut tx, user, case, change).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        case_id = %case.case_id,
        from = %case.status,
        status = %status,
        "Case status changed",
    );
    Ok(updated)
}

/// Comment and audit entry for a status write already made on `conn`.
pub async fn record_change(
    conn: &mut SqliteConnection,
    user: &AuthUser,
    case: &Case,
    change: StatusChange<'_>,
) -> AppResult<()> {
    CommentRepo::create(
        &mut *conn,
        &CreateComment {
            case_id: case.case_id.clone(),
            comment_type: change.comment_type.to_string(),
            comment: change.comment,
            created_by: user.username.clone(),
        },
    )
    .await?;
    AuditLogRepo::append_in(
        conn,
        &CreateAuditLog {
            case_id: Some(case.case_id.clone()),
            user_id: Some(user.user_id),
            username: user.username.clone(),
            action_type: change.action_type.to_string(),
            details_json: json!({
                "from": case.status,
                "to": change.status.as_str(),
                "details": change.details,
            }),
        },
    )
    .await?;
    Ok(())
}
