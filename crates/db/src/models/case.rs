//! Case entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

/// A row from the `cases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Case {
    pub id: DbId,
    pub case_id: String,
    pub category: Option<String>,
    pub referred_by: Option<String>,
    pub case_type: String,
    pub case_date: Option<NaiveDate>,
    pub case_description: String,
    pub customer_name: Option<String>,
    pub lan: Option<String>,
    pub loan_amount: Option<f64>,
    pub product: Option<String>,
    pub branch_location: Option<String>,
    pub region: Option<String>,
    pub pan: Option<String>,
    pub aadhaar: Option<String>,
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
    pub disbursement_date: Option<NaiveDate>,
    /// Type-specific intake fields.
    pub case_details: Option<serde_json::Value>,
    pub status: String,
    pub priority: Option<String>,
    pub risk_score: Option<f64>,
    pub risk_category: Option<String>,
    pub closure_type: Option<String>,
    pub closure_remarks: Option<String>,
    pub closed_at: Option<Timestamp>,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a case. `case_id` and `status` are decided by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCase {
    pub case_id: String,
    pub category: Option<String>,
    pub referred_by: Option<String>,
    pub case_type: String,
    pub case_date: Option<NaiveDate>,
    pub case_description: String,
    pub customer_name: Option<String>,
    pub lan: Option<String>,
    pub loan_amount: Option<f64>,
    pub product: Option<String>,
    pub branch_location: Option<String>,
    pub region: Option<String>,
    pub pan: Option<String>,
    pub aadhaar: Option<String>,
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
    pub disbursement_date: Option<NaiveDate>,
    pub case_details: Option<serde_json::Value>,
    pub status: String,
    pub priority: Option<String>,
    pub created_by: String,
}

/// Patch for descriptive case fields. Status is not patchable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCase {
    pub category: Option<String>,
    pub referred_by: Option<String>,
    pub case_type: Option<String>,
    pub case_date: Option<NaiveDate>,
    pub case_description: Option<String>,
    pub customer_name: Option<String>,
    pub lan: Option<String>,
    pub loan_amount: Option<f64>,
    pub product: Option<String>,
    pub branch_location: Option<String>,
    pub region: Option<String>,
    pub pan: Option<String>,
    pub aadhaar: Option<String>,
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
    pub disbursement_date: Option<NaiveDate>,
    pub case_details: Option<serde_json::Value>,
    pub priority: Option<String>,
}

/// Filter and pagination for case listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseFilter {
    pub status: Option<String>,
    pub case_type: Option<String>,
    pub created_by: Option<String>,
    pub region: Option<String>,
    /// Matched against case id, customer name, LAN and description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CasePage {
    pub items: Vec<Case>,
    pub total: i64,
}
