use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

pub const NOTICE_STATUS_DRAFT: &str = "draft";
pub const NOTICE_STATUS_ISSUED: &str = "issued";

/// A legal notice drafted for a case.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LegalNotice {
    pub id: DbId,
    pub case_id: String,
    pub notice_type: String,
    pub reference_number: String,
    pub content: String,
    pub grounds: Option<String>,
    /// JSON array of violation strings.
    pub violations: Option<serde_json::Value>,
    pub response_deadline: Option<NaiveDate>,
    /// `draft` or `issued`.
    pub status: String,
    /// `template` or `ai`.
    pub source: String,
    pub created_by: String,
    pub created_at: Timestamp,
    pub issued_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLegalNotice {
    pub case_id: String,
    pub notice_type: String,
    pub reference_number: String,
    pub content: String,
    pub grounds: Option<String>,
    pub violations: Option<serde_json::Value>,
    pub response_deadline: Option<NaiveDate>,
    pub source: String,
    pub created_by: String,
}
