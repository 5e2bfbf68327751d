//! Repository for the append-only `case_comments` table.

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::comment::{CaseComment, CreateComment};

const COLUMNS: &str = "id, case_id, comment_type, comment, created_by, created_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateComment) -> Result<CaseComment, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO case_comments (case_id, comment_type, comment, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CaseComment>(&query)
            .bind(&input.case_id)
            .bind(&input.comment_type)
            .bind(&input.comment)
            .bind(&input.created_by)
            .fetch_one(executor)
            .await
    }

    /// All comments on a case, oldest first.
    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<CaseComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM case_comments WHERE case_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, CaseComment>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }
}
