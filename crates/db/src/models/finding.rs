use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

/// An investigator's recorded outcome for a case.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvestigationFinding {
    pub id: DbId,
    pub case_id: String,
    pub action_type: String,
    pub fraud_reason: Option<String>,
    /// JSON array of tag strings.
    pub fraud_tags: Option<serde_json::Value>,
    pub closure_reason: Option<String>,
    pub regional_assignment: Option<String>,
    pub agency_assignment: Option<String>,
    pub comments: Option<String>,
    pub reviewed_by: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFinding {
    pub case_id: String,
    pub action_type: String,
    pub fraud_reason: Option<String>,
    pub fraud_tags: Option<serde_json::Value>,
    pub closure_reason: Option<String>,
    pub regional_assignment: Option<String>,
    pub agency_assignment: Option<String>,
    pub comments: Option<String>,
    pub reviewed_by: String,
}
