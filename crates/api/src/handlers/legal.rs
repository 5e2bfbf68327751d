//! Legal notices: draft, list, issue and render to PDF.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::error::CoreError;
use tathya_core::legal::{self, NoticeContext, NoticeType};
use tathya_core::roles::ROLE_LEGAL_REVIEWER;
use tathya_core::types::DbId;
use tathya_db::models::case::Case;
use tathya_db::models::finding::InvestigationFinding;
use tathya_db::models::legal_notice::{CreateLegalNotice, LegalNotice};
use tathya_db::repositories::{FindingRepo, LegalNoticeRepo};
use tathya_verify::Source;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::reports::pdf;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DraftNoticeRequest {
    pub notice_type: NoticeType,
    /// Defaults to the latest finding's fraud reason.
    pub grounds: Option<String>,
    /// Defaults to the latest finding's fraud tags.
    #[serde(default)]
    pub violations: Vec<String>,
}

fn notice_source(source: Source) -> &'static str {
    match source {
        Source::Live => "ai",
        Source::Simulated => "template",
    }
}

/// Fill a notice context from the case and its latest finding.
pub fn notice_context(
    case: &Case,
    finding: Option<&InvestigationFinding>,
    grounds: Option<String>,
    violations: Vec<String>,
) -> NoticeContext {
    let grounds = grounds
        .filter(|g| !g.trim().is_empty())
        .or_else(|| finding.and_then(|f| f.fraud_reason.clone()));
    let violations = if violations.is_empty() {
        finding
            .and_then(|f| f.fraud_tags.as_ref())
            .and_then(|tags| tags.as_array())
            .map(|tags| {
                tags.iter()
                    .filter_map(|t| t.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        violations
    };

    NoticeContext {
        case_id: case.case_id.clone(),
        customer_name: case.customer_name.clone(),
        pan: case.pan.clone(),
        mobile: case.mobile_number.clone(),
        email: case.email_id.clone(),
        lan: case.lan.clone(),
        loan_amount: case.loan_amount,
        disbursement_date: case.disbursement_date.map(|d| d.format("%d-%m-%Y").to_string()),
        case_type: Some(case.case_type.clone()),
        product: case.product.clone(),
        branch: case.branch_location.clone(),
        description: Some(case.case_description.clone()),
        grounds,
        violations,
    }
}

async fn load_notice(state: &AppState, id: DbId) -> AppResult<LegalNotice> {
    LegalNoticeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LegalNotice",
            id,
        }))
}

/// POST /api/v1/cases/{case_id}/notices
///
/// Draft a notice from the case record. The AI draft is used when a
/// Gemini key is configured, otherwise the template.
pub async fn draft_notice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<DraftNoticeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LegalNotice>>)> {
    user.ensure_role(&[ROLE_LEGAL_REVIEWER])?;
    let case = activity::load_case(&state.pool, &case_id).await?;
    let finding = FindingRepo::latest_for_case(&state.pool, &case.case_id).await?;

    let ctx = notice_context(&case, finding.as_ref(), input.grounds, input.violations);
    let today = Utc::now().date_naive();
    let draft = state.ai.draft_notice(input.notice_type, &ctx, today).await?;

    let notice = LegalNoticeRepo::create(
        &state.pool,
        &CreateLegalNotice {
            case_id: case.case_id.clone(),
            notice_type: input.notice_type.label().to_string(),
            reference_number: legal::reference_number(input.notice_type, &case.case_id, today),
            content: draft.content,
            grounds: ctx.grounds.clone(),
            violations: (!ctx.violations.is_empty()).then(|| json!(ctx.violations)),
            response_deadline: input.notice_type.response_deadline(today),
            source: notice_source(draft.source).to_string(),
            created_by: user.username.clone(),
        },
    )
    .await?;

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::NOTICE_DRAFT,
        json!({
            "notice_id": notice.id,
            "notice_type": notice.notice_type,
            "reference_number": notice.reference_number,
            "source": notice.source,
        }),
    )
    .await?;
    tracing::info!(
        user_id = user.user_id,
        case_id = %case.case_id,
        notice_id = notice.id,
        source = %notice.source,
        "Legal notice drafted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: notice })))
}

/// GET /api/v1/cases/{case_id}/notices
pub async fn list_notices(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<LegalNotice>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let notices = LegalNoticeRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: notices }))
}

/// GET /api/v1/notices/{id}
pub async fn get_notice(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LegalNotice>>> {
    let notice = load_notice(&state, id).await?;
    Ok(Json(DataResponse { data: notice }))
}

/// POST /api/v1/notices/{id}/issue
///
/// Issuing an already issued notice is a conflict.
pub async fn issue_notice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LegalNotice>>> {
    user.ensure_role(&[ROLE_LEGAL_REVIEWER])?;
    let existing = load_notice(&state, id).await?;
    let notice = LegalNoticeRepo::mark_issued(&state.pool, id, Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Notice {} has already been issued",
                existing.reference_number
            )))
        })?;

    activity::add_comment(
        &state.pool,
        &notice.case_id,
        "Legal Notice",
        format!(
            "{} ISSUED: {}",
            notice.notice_type.to_uppercase(),
            notice.reference_number
        ),
        &user.username,
    )
    .await?;
    activity::audit(
        &state.pool,
        &user,
        Some(&notice.case_id),
        action_types::NOTICE_ISSUE,
        json!({
            "notice_id": notice.id,
            "reference_number": notice.reference_number,
        }),
    )
    .await?;
    tracing::info!(user_id = user.user_id, case_id = %notice.case_id, notice_id = notice.id, "Legal notice issued");

    Ok(Json(DataResponse { data: notice }))
}

/// GET /api/v1/notices/{id}/pdf
pub async fn notice_pdf(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let notice = load_notice(&state, id).await?;
    let bytes = pdf::render(&notice.notice_type, &pdf::notice_lines(&notice))?;
    let filename = format!("{}.pdf", notice.reference_number.replace('/', "_"));
    Ok(pdf_response(bytes, &filename))
}

/// Attach PDF headers to rendered bytes.
pub fn pdf_response(bytes: Vec<u8>, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_case() -> Case {
        let now = Utc::now();
        Case {
            id: 1,
            case_id: "CASE1".into(),
            category: None,
            referred_by: None,
            case_type: "Identity Fraud".into(),
            case_date: None,
            case_description: "Forged salary slips".into(),
            customer_name: Some("Ravi Kumar".into()),
            lan: Some("LAN001".into()),
            loan_amount: Some(250000.0),
            product: None,
            branch_location: None,
            region: None,
            pan: Some("ABCDE1234F".into()),
            aadhaar: None,
            mobile_number: None,
            email_id: None,
            disbursement_date: None,
            case_details: None,
            status: "Legal Review".into(),
            priority: None,
            risk_score: None,
            risk_category: None,
            closure_type: None,
            closure_remarks: None,
            closed_at: None,
            created_by: "init".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_finding() -> InvestigationFinding {
        InvestigationFinding {
            id: 1,
            case_id: "CASE1".into(),
            action_type: "final_review".into(),
            fraud_reason: Some("Income documents fabricated".into()),
            fraud_tags: Some(json!(["Document Forgery", "Income Misrepresentation"])),
            closure_reason: None,
            regional_assignment: None,
            agency_assignment: None,
            comments: None,
            reviewed_by: "inv".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn context_falls_back_to_latest_finding() {
        let ctx = notice_context(&sample_case(), Some(&sample_finding()), None, vec![]);
        assert_eq!(ctx.grounds.as_deref(), Some("Income documents fabricated"));
        assert_eq!(ctx.violations.len(), 2);
        assert_eq!(ctx.customer_name.as_deref(), Some("Ravi Kumar"));
    }

    #[test]
    fn explicit_grounds_win() {
        let ctx = notice_context(
            &sample_case(),
            Some(&sample_finding()),
            Some("Misstated employer".into()),
            vec!["KYC Fraud".into()],
        );
        assert_eq!(ctx.grounds.as_deref(), Some("Misstated employer"));
        assert_eq!(ctx.violations, vec!["KYC Fraud".to_string()]);
    }

    #[test]
    fn source_labels() {
        assert_eq!(notice_source(Source::Live), "ai");
        assert_eq!(notice_source(Source::Simulated), "template");
    }
}
