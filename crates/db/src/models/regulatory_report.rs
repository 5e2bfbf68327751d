use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tathya_core::types::{DbId, Timestamp};

/// A stored FMR-1 return.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegulatoryReport {
    pub id: DbId,
    pub case_id: String,
    pub report_type: String,
    pub reporting_date: NaiveDate,
    pub fraud_amount: f64,
    pub fraud_type: String,
    pub detection_method: String,
    pub geographical_area: String,
    pub recovery_amount: f64,
    pub incident_description: Option<String>,
    pub modus_operandi: Option<String>,
    pub police_complaint: bool,
    pub fir_number: Option<String>,
    pub police_station: Option<String>,
    pub staff_involvement: String,
    pub staff_action: Option<String>,
    pub prevention_measures: Option<String>,
    pub generated_by: String,
    /// `Pending` or `Submitted`.
    pub submission_status: String,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegulatoryReport {
    pub case_id: String,
    pub report_type: String,
    pub reporting_date: NaiveDate,
    pub fraud_amount: f64,
    pub fraud_type: String,
    pub detection_method: String,
    pub geographical_area: String,
    pub recovery_amount: f64,
    pub incident_description: Option<String>,
    pub modus_operandi: Option<String>,
    pub police_complaint: bool,
    pub fir_number: Option<String>,
    pub police_station: Option<String>,
    pub staff_involvement: String,
    pub staff_action: Option<String>,
    pub prevention_measures: Option<String>,
    pub generated_by: String,
}

/// Reports, fraud and recovery per reporting month (`YYYY-MM`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyReportStats {
    pub month: String,
    pub report_count: i64,
    pub total_amount: f64,
    pub total_recovery: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FraudTypeStats {
    pub fraud_type: String,
    pub count: i64,
    pub amount: f64,
}
