//! Aggregate queries backing the dashboards.

use sqlx::SqlitePool;

use crate::models::audit::AuditLog;
use crate::models::dashboard::{CaseTotals, CaseTypeCount, StatusCount};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Case count per stored status string, including unknown values.
    pub async fn status_counts(pool: &SqlitePool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM cases GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn case_type_counts(pool: &SqlitePool) -> Result<Vec<CaseTypeCount>, sqlx::Error> {
        sqlx::query_as::<_, CaseTypeCount>(
            "SELECT case_type, COUNT(*) AS count FROM cases \
             GROUP BY case_type ORDER BY count DESC, case_type",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn totals(pool: &SqlitePool) -> Result<CaseTotals, sqlx::Error> {
        sqlx::query_as::<_, CaseTotals>(
            "SELECT COUNT(*) AS total_cases, \
                    CAST(COALESCE(SUM(loan_amount), 0) AS REAL) AS total_loan_amount, \
                    COALESCE(SUM(CASE WHEN status = 'Closed' THEN 1 ELSE 0 END), 0) AS closed_cases, \
                    COALESCE(SUM(CASE WHEN status = 'Rejected' THEN 1 ELSE 0 END), 0) AS rejected_cases \
             FROM cases",
        )
        .fetch_one(pool)
        .await
    }

    /// Latest audit entries, newest first.
    pub async fn recent_activity(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        sqlx::query_as::<_, AuditLog>(
            "SELECT id, timestamp, case_id, user_id, username, action_type, details_json, \
                    integrity_hash, created_at \
             FROM audit_logs ORDER BY id DESC LIMIT $1",
        )
        .bind(limit.clamp(1, 200))
        .fetch_all(pool)
        .await
    }
}
