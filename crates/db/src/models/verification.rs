use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

pub mod check_types {
    pub const MOBILE: &str = "mobile";
    pub const PAN: &str = "pan";
    pub const PAN_AADHAAR_LINK: &str = "pan_aadhaar_link";
    pub const AADHAAR: &str = "aadhaar";
    pub const ID_FORMAT: &str = "id_format";
    pub const DOCUMENT_ANALYSIS: &str = "document_analysis";
    pub const FACE_MATCH: &str = "face_match";
}

/// A stored verification outcome.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VerificationRecord {
    pub id: DbId,
    pub case_id: Option<String>,
    pub check_type: String,
    /// The checked value, masked where sensitive.
    pub subject: String,
    pub passed: bool,
    /// `live` or `simulated`.
    pub source: String,
    pub result_json: serde_json::Value,
    pub checked_by: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVerificationRecord {
    pub case_id: Option<String>,
    pub check_type: String,
    pub subject: String,
    pub passed: bool,
    pub source: String,
    pub result_json: serde_json::Value,
    pub checked_by: String,
}
