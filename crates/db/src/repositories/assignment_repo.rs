//! Repository for the `case_assignments` table.

use sqlx::SqlitePool;

use crate::models::assignment::{CaseAssignment, CreateAssignment};

const COLUMNS: &str = "id, case_id, investigation_type, assigned_to, priority, \
                       expected_completion, instructions, assigned_by, assigned_at";

pub struct AssignmentRepo;

impl AssignmentRepo {
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateAssignment,
    ) -> Result<CaseAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO case_assignments (case_id, investigation_type, assigned_to, priority, \
                 expected_completion, instructions, assigned_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CaseAssignment>(&query)
            .bind(&input.case_id)
            .bind(&input.investigation_type)
            .bind(&input.assigned_to)
            .bind(&input.priority)
            .bind(input.expected_completion)
            .bind(&input.instructions)
            .bind(&input.assigned_by)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<CaseAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM case_assignments WHERE case_id = $1 ORDER BY assigned_at, id"
        );
        sqlx::query_as::<_, CaseAssignment>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// Assignments given to `assignee`, newest first.
    pub async fn list_for_assignee(
        pool: &SqlitePool,
        assignee: &str,
    ) -> Result<Vec<CaseAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM case_assignments WHERE assigned_to = $1 \
             ORDER BY assigned_at DESC, id DESC"
        );
        sqlx::query_as::<_, CaseAssignment>(&query)
            .bind(assignee)
            .fetch_all(pool)
            .await
    }
}
