//! Case report downloads: risk assessment PDF and full JSON export.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tathya_core::audit::action_types;

use crate::activity;
use crate::error::AppResult;
use crate::handlers::legal::pdf_response;
use crate::handlers::risk::{assess_case, ComponentOverrides};
use crate::middleware::auth::AuthUser;
use crate::reports::export::CaseExport;
use crate::reports::pdf;
use crate::state::AppState;

/// GET /api/v1/cases/{case_id}/reports/risk.pdf
pub async fn risk_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Response> {
    let case = activity::load_case(&state.pool, &case_id).await?;
    let (_, assessment) =
        assess_case(&state.pool, &case.case_id, &ComponentOverrides::default()).await?;
    let bytes = pdf::render(
        "Fraud Risk Assessment Report",
        &pdf::risk_report_lines(&case, &assessment),
    )?;

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::REPORT_EXPORT,
        json!({ "format": "pdf", "report": "risk_assessment", "size": bytes.len() }),
    )
    .await?;

    let filename = format!("risk_assessment_{}.pdf", case.case_id);
    Ok(pdf_response(bytes, &filename))
}

/// GET /api/v1/cases/{case_id}/export
///
/// The case record with its comments, documents, assignments, findings,
/// notices and verifications.
pub async fn export_case(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Response> {
    let case = activity::load_case(&state.pool, &case_id).await?;
    let export = CaseExport::collect(&state.pool, case, &user.username).await?;

    activity::audit(
        &state.pool,
        &user,
        Some(&export.case.case_id),
        action_types::REPORT_EXPORT,
        json!({ "format": "json", "report": "case_export" }),
    )
    .await?;
    tracing::info!(user_id = user.user_id, case_id = %export.case.case_id, "Case exported");

    let disposition = format!(
        "attachment; filename=\"case_{}.json\"",
        export.case.case_id
    );
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)).into_response())
}
