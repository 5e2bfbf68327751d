//! Repository for the `investigation_findings` table.

use sqlx::SqlitePool;

use crate::models::finding::{CreateFinding, InvestigationFinding};

const COLUMNS: &str = "id, case_id, action_type, fraud_reason, fraud_tags, closure_reason, \
                       regional_assignment, agency_assignment, comments, reviewed_by, created_at";

pub struct FindingRepo;

impl FindingRepo {
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateFinding,
    ) -> Result<InvestigationFinding, sqlx::Error> {
        let query = format!(
            "INSERT INTO investigation_findings (case_id, action_type, fraud_reason, fraud_tags, \
                 closure_reason, regional_assignment, agency_assignment, comments, reviewed_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvestigationFinding>(&query)
            .bind(&input.case_id)
            .bind(&input.action_type)
            .bind(&input.fraud_reason)
            .bind(&input.fraud_tags)
            .bind(&input.closure_reason)
            .bind(&input.regional_assignment)
            .bind(&input.agency_assignment)
            .bind(&input.comments)
            .bind(&input.reviewed_by)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<InvestigationFinding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM investigation_findings WHERE case_id = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, InvestigationFinding>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent finding on a case, if any.
    pub async fn latest_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Option<InvestigationFinding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM investigation_findings WHERE case_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, InvestigationFinding>(&query)
            .bind(case_id)
            .fetch_optional(pool)
            .await
    }
}
