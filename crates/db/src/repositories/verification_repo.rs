//! Repository for the `verification_results` table.

use sqlx::SqlitePool;

use crate::models::verification::{CreateVerificationRecord, VerificationRecord};

const COLUMNS: &str =
    "id, case_id, check_type, subject, passed, source, result_json, checked_by, created_at";

pub struct VerificationRepo;

impl VerificationRepo {
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateVerificationRecord,
    ) -> Result<VerificationRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO verification_results (case_id, check_type, subject, passed, source, \
                 result_json, checked_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VerificationRecord>(&query)
            .bind(&input.case_id)
            .bind(&input.check_type)
            .bind(&input.subject)
            .bind(input.passed)
            .bind(&input.source)
            .bind(&input.result_json)
            .bind(&input.checked_by)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<VerificationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM verification_results WHERE case_id = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, VerificationRecord>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent result of `check_type` for a case.
    pub async fn latest(
        pool: &SqlitePool,
        case_id: &str,
        check_type: &str,
    ) -> Result<Option<VerificationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM verification_results WHERE case_id = $1 AND check_type = $2 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, VerificationRecord>(&query)
            .bind(case_id)
            .bind(check_type)
            .fetch_optional(pool)
            .await
    }
}
