use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

/// Metadata for an uploaded evidence file.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseDocument {
    pub id: DbId,
    pub case_id: String,
    /// Free-text kind such as `PAN Card` or `Salary Slip`.
    pub document_type: Option<String>,
    pub original_filename: String,
    #[serde(skip_serializing)]
    pub stored_path: String,
    pub content_type: Option<String>,
    pub file_size: i64,
    pub uploaded_by: String,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub case_id: String,
    pub document_type: Option<String>,
    pub original_filename: String,
    pub stored_path: String,
    pub content_type: Option<String>,
    pub file_size: i64,
    pub uploaded_by: String,
}
