use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

/// Allocation of a case to an investigation team.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseAssignment {
    pub id: DbId,
    pub case_id: String,
    /// Internal, External, Agency or Regional.
    pub investigation_type: String,
    pub assigned_to: String,
    pub priority: String,
    pub expected_completion: Option<NaiveDate>,
    pub instructions: Option<String>,
    pub assigned_by: String,
    pub assigned_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignment {
    pub case_id: String,
    pub investigation_type: String,
    pub assigned_to: String,
    pub priority: String,
    pub expected_completion: Option<NaiveDate>,
    pub instructions: Option<String>,
    pub assigned_by: String,
}
