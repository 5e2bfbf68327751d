//! Aggregate rows for dashboards.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseTypeCount {
    pub case_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseTotals {
    pub total_cases: i64,
    pub total_loan_amount: f64,
    pub closed_cases: i64,
    pub rejected_cases: i64,
}
