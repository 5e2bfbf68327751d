use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

/// A row from the append-only `case_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseComment {
    pub id: DbId,
    pub case_id: String,
    pub comment_type: String,
    pub comment: String,
    pub created_by: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub case_id: String,
    pub comment_type: String,
    pub comment: String,
    pub created_by: String,
}
