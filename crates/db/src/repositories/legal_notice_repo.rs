//! Repository for the `legal_notices` table.

use sqlx::SqlitePool;
use tathya_core::types::{DbId, Timestamp};

use crate::models::legal_notice::{
    CreateLegalNotice, LegalNotice, NOTICE_STATUS_DRAFT, NOTICE_STATUS_ISSUED,
};

const COLUMNS: &str = "id, case_id, notice_type, reference_number, content, grounds, violations, \
                       response_deadline, status, source, created_by, created_at, issued_at";

pub struct LegalNoticeRepo;

impl LegalNoticeRepo {
    /// Insert a notice in `draft` status.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateLegalNotice,
    ) -> Result<LegalNotice, sqlx::Error> {
        let query = format!(
            "INSERT INTO legal_notices (case_id, notice_type, reference_number, content, grounds, \
                 violations, response_deadline, status, source, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LegalNotice>(&query)
            .bind(&input.case_id)
            .bind(&input.notice_type)
            .bind(&input.reference_number)
            .bind(&input.content)
            .bind(&input.grounds)
            .bind(&input.violations)
            .bind(input.response_deadline)
            .bind(NOTICE_STATUS_DRAFT)
            .bind(&input.source)
            .bind(&input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<LegalNotice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM legal_notices WHERE id = $1");
        sqlx::query_as::<_, LegalNotice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<LegalNotice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM legal_notices WHERE case_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, LegalNotice>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a draft notice as issued. Returns `None` if the notice does not
    /// exist or was already issued.
    pub async fn mark_issued(
        pool: &SqlitePool,
        id: DbId,
        at: Timestamp,
    ) -> Result<Option<LegalNotice>, sqlx::Error> {
        let query = format!(
            "UPDATE legal_notices SET status = $2, issued_at = $3 \
             WHERE id = $1 AND status = $4 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LegalNotice>(&query)
            .bind(id)
            .bind(NOTICE_STATUS_ISSUED)
            .bind(at)
            .bind(NOTICE_STATUS_DRAFT)
            .fetch_optional(pool)
            .await
    }
}
