//! Audit log entity models and DTOs.
//!
//! Audit rows have no `updated_at` field (immutable records).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub case_id: Option<String>,
    pub user_id: Option<DbId>,
    pub username: String,
    pub action_type: String,
    pub details_json: serde_json::Value,
    pub integrity_hash: String,
    pub created_at: Timestamp,
}

/// DTO for appending an audit entry. The repository fills in the timestamp
/// and the chained hash.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub case_id: Option<String>,
    pub user_id: Option<DbId>,
    pub username: String,
    pub action_type: String,
    pub details_json: serde_json::Value,
}

/// Filter parameters for querying audit logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub case_id: Option<String>,
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub action_type: Option<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub search_text: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paginated response for audit log queries.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
}

/// Result of an audit log integrity verification.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityCheckResult {
    pub verified_entries: i64,
    pub chain_valid: bool,
    /// ID of the first entry where the chain breaks, if any.
    pub first_break: Option<DbId>,
}
