//! FMR-1 regulatory reporting: the queue of cases awaiting a return,
//! report creation, submission tracking and analytics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::error::CoreError;
use tathya_core::regulatory::{
    self, DetectionMethod, FraudType, GeographicalArea, StaffInvolvement, REPORT_TYPE_FMR1,
    SUBMISSION_PENDING, SUBMISSION_SUBMITTED,
};
use tathya_core::roles::ROLE_LEGAL_REVIEWER;
use tathya_core::types::DbId;
use tathya_core::workflow::CaseStatus;
use tathya_db::models::case::Case;
use tathya_db::models::regulatory_report::{
    CreateRegulatoryReport, FraudTypeStats, MonthlyReportStats, RegulatoryReport,
};
use tathya_db::repositories::{CaseRepo, RegulatoryReportRepo};

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateFmr1Request {
    /// Defaults to today.
    pub reporting_date: Option<NaiveDate>,
    /// Defaults to the case's loan amount.
    pub fraud_amount: Option<f64>,
    pub fraud_type: FraudType,
    pub detection_method: DetectionMethod,
    pub geographical_area: GeographicalArea,
    #[serde(default)]
    pub recovery_amount: f64,
    pub incident_description: Option<String>,
    pub modus_operandi: Option<String>,
    #[serde(default)]
    pub police_complaint: bool,
    pub fir_number: Option<String>,
    pub police_station: Option<String>,
    pub staff_involvement: StaffInvolvement,
    pub staff_action: Option<String>,
    pub prevention_measures: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    /// `Pending` or `Submitted`.
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegulatoryAnalytics {
    pub monthly: Vec<MonthlyReportStats>,
    pub by_fraud_type: Vec<FraudTypeStats>,
    pub total_reports: i64,
    pub total_fraud_amount: f64,
    pub total_recovery: f64,
    pub recovery_rate: f64,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn load_report(state: &AppState, id: DbId) -> AppResult<RegulatoryReport> {
    RegulatoryReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RegulatoryReport",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/regulatory/pending
///
/// Cases in legal review with no FMR-1 return yet.
pub async fn pending_cases(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Case>>>> {
    user.ensure_role(&[ROLE_LEGAL_REVIEWER])?;
    let cases = CaseRepo::list_unreported(
        &state.pool,
        CaseStatus::LegalReview.as_str(),
        REPORT_TYPE_FMR1,
    )
    .await?;
    Ok(Json(DataResponse { data: cases }))
}

/// POST /api/v1/cases/{case_id}/regulatory-reports
///
/// A case carries at most one FMR-1 return.
pub async fn create_fmr1(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<CreateFmr1Request>,
) -> AppResult<(StatusCode, Json<DataResponse<RegulatoryReport>>)> {
    user.ensure_role(&[ROLE_LEGAL_REVIEWER])?;
    let case = activity::load_case(&state.pool, &case_id).await?;

    let fraud_amount = input
        .fraud_amount
        .unwrap_or_else(|| case.loan_amount.unwrap_or(0.0));
    let fir_number = trimmed(input.fir_number);
    regulatory::validate_report(
        fraud_amount,
        input.recovery_amount,
        input.police_complaint,
        fir_number.as_deref(),
    )
    .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let existing = RegulatoryReportRepo::list_for_case(&state.pool, &case.case_id).await?;
    if existing.iter().any(|r| r.report_type == REPORT_TYPE_FMR1) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "An FMR1 report already exists for case {}",
            case.case_id
        ))));
    }

    let reporting_date = input
        .reporting_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let report = RegulatoryReportRepo::create(
        &state.pool,
        &CreateRegulatoryReport {
            case_id: case.case_id.clone(),
            report_type: REPORT_TYPE_FMR1.to_string(),
            reporting_date,
            fraud_amount,
            fraud_type: input.fraud_type.label().to_string(),
            detection_method: input.detection_method.label().to_string(),
            geographical_area: input.geographical_area.label().to_string(),
            recovery_amount: input.recovery_amount,
            incident_description: trimmed(input.incident_description),
            modus_operandi: trimmed(input.modus_operandi),
            police_complaint: input.police_complaint,
            fir_number,
            police_station: trimmed(input.police_station),
            staff_involvement: input.staff_involvement.label().to_string(),
            staff_action: trimmed(input.staff_action),
            prevention_measures: trimmed(input.prevention_measures),
            generated_by: user.username.clone(),
        },
    )
    .await?;

    activity::add_comment(
        &state.pool,
        &case.case_id,
        "Regulatory",
        format!("FMR1 REPORT GENERATED: reporting date {reporting_date}"),
        &user.username,
    )
    .await?;
    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::REGULATORY_REPORT,
        json!({
            "report_id": report.id,
            "report_type": report.report_type,
            "fraud_amount": report.fraud_amount,
            "fraud_type": report.fraud_type,
        }),
    )
    .await?;
    tracing::info!(user_id = user.user_id, case_id = %case.case_id, report_id = report.id, "FMR1 report generated");

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/v1/cases/{case_id}/regulatory-reports
pub async fn list_for_case(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<RegulatoryReport>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let reports = RegulatoryReportRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/regulatory/reports?status=
pub async fn list_reports(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<DataResponse<Vec<RegulatoryReport>>>> {
    user.ensure_role(&[ROLE_LEGAL_REVIEWER])?;
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case(SUBMISSION_PENDING) => Some(SUBMISSION_PENDING),
        Some(s) if s.eq_ignore_ascii_case(SUBMISSION_SUBMITTED) => Some(SUBMISSION_SUBMITTED),
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Unknown submission status '{other}'"
            )))
        }
    };
    let reports = RegulatoryReportRepo::list(&state.pool, REPORT_TYPE_FMR1, status).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// POST /api/v1/regulatory/reports/{id}/submit
///
/// Record submission to the regulator. Submitting twice is a conflict.
pub async fn mark_submitted(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RegulatoryReport>>> {
    user.ensure_role(&[ROLE_LEGAL_REVIEWER])?;
    let existing = load_report(&state, id).await?;
    let report = RegulatoryReportRepo::mark_submitted(&state.pool, id, &user.username, Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "{} report for case {} has already been submitted",
                existing.report_type, existing.case_id
            )))
        })?;

    activity::add_comment(
        &state.pool,
        &report.case_id,
        "Regulatory",
        format!("{} REPORT SUBMITTED TO RBI", report.report_type),
        &user.username,
    )
    .await?;
    activity::audit(
        &state.pool,
        &user,
        Some(&report.case_id),
        action_types::REGULATORY_SUBMIT,
        json!({ "report_id": report.id, "report_type": report.report_type }),
    )
    .await?;
    tracing::info!(user_id = user.user_id, case_id = %report.case_id, report_id = report.id, "Regulatory report submitted");

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/regulatory/analytics
pub async fn analytics(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<RegulatoryAnalytics>>> {
    user.ensure_role(&[ROLE_LEGAL_REVIEWER])?;
    let monthly = RegulatoryReportRepo::monthly_stats(&state.pool, REPORT_TYPE_FMR1).await?;
    let by_fraud_type =
        RegulatoryReportRepo::fraud_type_stats(&state.pool, REPORT_TYPE_FMR1).await?;
    Ok(Json(DataResponse {
        data: summarize(monthly, by_fraud_type),
    }))
}

fn summarize(
    monthly: Vec<MonthlyReportStats>,
    by_fraud_type: Vec<FraudTypeStats>,
) -> RegulatoryAnalytics {
    let total_reports = monthly.iter().map(|m| m.report_count).sum();
    let total_fraud_amount: f64 = monthly.iter().map(|m| m.total_amount).sum();
    let total_recovery: f64 = monthly.iter().map(|m| m.total_recovery).sum();
    RegulatoryAnalytics {
        recovery_rate: regulatory::recovery_rate(total_fraud_amount, total_recovery),
        monthly,
        by_fraud_type,
        total_reports,
        total_fraud_amount,
        total_recovery,
    }
}
