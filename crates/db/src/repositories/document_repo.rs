//! Repository for the `case_documents` table.

use sqlx::SqlitePool;
use tathya_core::types::DbId;

use crate::models::document::{CaseDocument, CreateDocument};

const COLUMNS: &str = "id, case_id, document_type, original_filename, stored_path, \
                       content_type, file_size, uploaded_by, uploaded_at";

pub struct DocumentRepo;

impl DocumentRepo {
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateDocument,
    ) -> Result<CaseDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO case_documents (case_id, document_type, original_filename, \
                 stored_path, content_type, file_size, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CaseDocument>(&query)
            .bind(&input.case_id)
            .bind(&input.document_type)
            .bind(&input.original_filename)
            .bind(&input.stored_path)
            .bind(&input.content_type)
            .bind(input.file_size)
            .bind(&input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<CaseDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM case_documents WHERE id = $1");
        sqlx::query_as::<_, CaseDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<CaseDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM case_documents WHERE case_id = $1 ORDER BY uploaded_at, id"
        );
        sqlx::query_as::<_, CaseDocument>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }
}
