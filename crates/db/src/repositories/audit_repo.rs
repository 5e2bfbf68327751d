//! Repository for the append-only `audit_logs` table.

use chrono::{SecondsFormat, SubsecRound, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tathya_core::audit::{canonical_entry, compute_integrity_hash, redact_sensitive_fields};
use tathya_core::types::Timestamp;

use crate::filter::{bind_values, bind_values_scalar, BindValue, Filter};
use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog, IntegrityCheckResult};

const COLUMNS: &str = "\
    id, timestamp, case_id, user_id, username, action_type, \
    details_json, integrity_hash, created_at";

/// Canonical hashed content of a stored or about-to-be-stored entry.
fn entry_data(
    timestamp: &Timestamp,
    case_id: Option<&str>,
    username: &str,
    action_type: &str,
    details: &serde_json::Value,
) -> String {
    canonical_entry(
        &timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        case_id,
        username,
        action_type,
        &details.to_string(),
    )
}

pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append one entry, chaining its hash to the current last entry.
    ///
    /// Sensitive keys in `details_json` are redacted before storage.
    pub async fn append(
        pool: &SqlitePool,
        entry: &CreateAuditLog,
    ) -> Result<AuditLog, sqlx::Error> {
        let mut tx = crate::begin_write(pool).await?;
        let row = Self::append_in(&mut tx, entry).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Append inside a caller's write transaction (see [`crate::begin_write`]).
    pub async fn append_in(
        conn: &mut SqliteConnection,
        entry: &CreateAuditLog,
    ) -> Result<AuditLog, sqlx::Error> {
        let details = redact_sensitive_fields(&entry.details_json);
        let timestamp = Utc::now().trunc_subsecs(3);

        let prev_hash: Option<String> = sqlx::query_scalar::<_, String>(
            "SELECT integrity_hash FROM audit_logs ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *conn)
        .await?;

        let hash = compute_integrity_hash(
            prev_hash.as_deref(),
            &entry_data(
                &timestamp,
                entry.case_id.as_deref(),
                &entry.username,
                &entry.action_type,
                &details,
            ),
        );

        let query = format!(
            "INSERT INTO audit_logs (timestamp, case_id, user_id, username, action_type, \
                 details_json, integrity_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AuditLog>(&query)
            .bind(timestamp)
            .bind(&entry.case_id)
            .bind(entry.user_id)
            .bind(&entry.username)
            .bind(&entry.action_type)
            .bind(&details)
            .bind(&hash)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!(id = row.id, action_type = %row.action_type, "Audit entry appended");
        Ok(row)
    }

    /// Query audit logs with filtering and pagination, newest first.
    pub async fn query(
        pool: &SqlitePool,
        params: &AuditQuery,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let limit = params.limit.unwrap_or(50).clamp(1, 500);
        let offset = params.offset.unwrap_or(0).max(0);

        let f = build_audit_filter(params);
        let idx = f.next_idx();
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs {} ORDER BY id DESC LIMIT ${idx} OFFSET ${}",
            f.where_clause(),
            idx + 1
        );
        bind_values(sqlx::query_as::<_, AuditLog>(&query), &f.values)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool, params: &AuditQuery) -> Result<i64, sqlx::Error> {
        let f = build_audit_filter(params);
        let query = format!("SELECT COUNT(*) FROM audit_logs {}", f.where_clause());
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &f.values)
            .fetch_one(pool)
            .await
    }

    /// Every entry matching the filter in insertion order, without pagination.
    pub async fn export(
        pool: &SqlitePool,
        params: &AuditQuery,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let f = build_audit_filter(params);
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs {} ORDER BY id ASC",
            f.where_clause()
        );
        bind_values(sqlx::query_as::<_, AuditLog>(&query), &f.values)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_logs WHERE case_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// Recompute the whole hash chain and report the first mismatch.
    pub async fn verify_chain(pool: &SqlitePool) -> Result<IntegrityCheckResult, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_logs ORDER BY id ASC");
        let entries = sqlx::query_as::<_, AuditLog>(&query).fetch_all(pool).await?;

        let mut prev_hash: Option<String> = None;
        let mut first_break = None;
        for entry in &entries {
            let expected = compute_integrity_hash(
                prev_hash.as_deref(),
                &entry_data(
                    &entry.timestamp,
                    entry.case_id.as_deref(),
                    &entry.username,
                    &entry.action_type,
                    &entry.details_json,
                ),
            );
            if expected != entry.integrity_hash {
                tracing::warn!(id = entry.id, "Audit hash chain broken");
                first_break = Some(entry.id);
                break;
            }
            prev_hash = Some(entry.integrity_hash.clone());
        }

        Ok(IntegrityCheckResult {
            verified_entries: entries.len() as i64,
            chain_valid: first_break.is_none(),
            first_break,
        })
    }
}

fn build_audit_filter(params: &AuditQuery) -> Filter {
    let mut f = Filter::new();
    if let Some(ref case_id) = params.case_id {
        f.push("case_id = {}", BindValue::Text(case_id.clone()));
    }
    if let Some(user_id) = params.user_id {
        f.push("user_id = {}", BindValue::BigInt(user_id));
    }
    if let Some(ref username) = params.username {
        f.push("username = {}", BindValue::Text(username.clone()));
    }
    if let Some(ref action_type) = params.action_type {
        f.push("action_type = {}", BindValue::Text(action_type.clone()));
    }
    if let Some(from) = params.from {
        f.push("timestamp >= {}", BindValue::Timestamp(from));
    }
    if let Some(to) = params.to {
        f.push("timestamp <= {}", BindValue::Timestamp(to));
    }
    if let Some(ref text) = params.search_text {
        f.push_text_search(&["details_json"], text);
    }
    f
}
