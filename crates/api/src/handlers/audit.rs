//! Audit trail endpoints. Log-wide queries are admin only; a case's own
//! trail is visible to any signed-in user.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tathya_core::types::{DbId, Timestamp};
use tathya_db::models::audit::{AuditLog, AuditLogPage, AuditQuery, IntegrityCheckResult};
use tathya_db::repositories::AuditLogRepo;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AuditLogQueryParams {
    pub case_id: Option<String>,
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub action_type: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub search_text: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Export only: `json` (default) or `csv`.
    pub format: Option<String>,
}

impl AuditLogQueryParams {
    fn to_query(&self) -> AppResult<AuditQuery> {
        Ok(AuditQuery {
            case_id: self.case_id.clone(),
            user_id: self.user_id,
            username: self.username.clone(),
            action_type: self.action_type.clone(),
            from: parse_timestamp(self.from.as_deref())?,
            to: parse_timestamp(self.to.as_deref())?,
            search_text: self.search_text.clone(),
            limit: self.limit,
            offset: self.offset,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an optional RFC 3339 timestamp.
fn parse_timestamp(value: Option<&str>) -> AppResult<Option<Timestamp>> {
    value
        .map(|v| {
            v.parse::<Timestamp>()
                .map_err(|_| AppError::BadRequest(format!("Invalid date format '{v}'")))
        })
        .transpose()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render entries as CSV with a header row.
pub fn to_csv(entries: &[AuditLog]) -> String {
    let mut out =
        String::from("id,timestamp,case_id,user_id,username,action_type,details,integrity_hash\n");
    for log in entries {
        let row = [
            log.id.to_string(),
            log.timestamp.to_rfc3339(),
            log.case_id.clone().unwrap_or_default(),
            log.user_id.map_or(String::new(), |id| id.to_string()),
            log.username.clone(),
            log.action_type.clone(),
            log.details_json.to_string(),
            log.integrity_hash.clone(),
        ];
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/audit-logs
pub async fn query_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditLogQueryParams>,
) -> AppResult<Json<DataResponse<AuditLogPage>>> {
    let query = params.to_query()?;
    let items = AuditLogRepo::query(&state.pool, &query).await?;
    let total = AuditLogRepo::count(&state.pool, &query).await?;
    Ok(Json(DataResponse {
        data: AuditLogPage { items, total },
    }))
}

/// GET /api/v1/audit-logs/export?format=csv|json
///
/// Every matching entry, oldest first, without pagination.
pub async fn export_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<AuditLogQueryParams>,
) -> AppResult<Response> {
    let query = params.to_query()?;
    let logs = AuditLogRepo::export(&state.pool, &query).await?;
    tracing::info!(user_id = admin.user_id, entries = logs.len(), "Audit log exported");

    match params.format.as_deref().unwrap_or("json") {
        "csv" => Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"audit-logs.csv\"",
                ),
            ],
            to_csv(&logs),
        )
            .into_response()),
        "json" => Ok(Json(DataResponse { data: logs }).into_response()),
        other => Err(AppError::BadRequest(format!(
            "Unsupported export format '{other}'"
        ))),
    }
}

/// GET /api/v1/audit-logs/integrity-check
pub async fn check_integrity(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<IntegrityCheckResult>>> {
    let result = AuditLogRepo::verify_chain(&state.pool).await?;
    if !result.chain_valid {
        tracing::warn!(first_break = ?result.first_break, "Audit log hash chain broken");
    }
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/cases/{case_id}/audit
pub async fn case_audit_trail(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<AuditLog>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let entries = AuditLogRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
