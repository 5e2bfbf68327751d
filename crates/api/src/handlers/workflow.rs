//! Workflow handlers: role actions, allocation, investigation findings,
//! closure, admin status override, stage queues and progress.
//!
//! Every status write goes through [`CaseStatus`], so a case only ever
//! holds a known status after one of these handlers runs. No check is made
//! between the current and requested status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::error::CoreError;
use tathya_core::workflow::{
    self, action_comment, CaseStatus, ClosureType, Progress, Stage, WorkflowAction,
};
use tathya_db::models::assignment::{CaseAssignment, CreateAssignment};
use tathya_db::models::case::Case;
use tathya_db::models::finding::{CreateFinding, InvestigationFinding};
use tathya_db::repositories::{AssignmentRepo, CaseRepo, FindingRepo};
use validator::Validate;

use crate::activity::{self, StatusChange};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: WorkflowAction,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AllocateRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub investigation_type: String,
    #[validate(length(min = 1, message = "is required"))]
    pub assigned_to: String,
    pub priority: Option<String>,
    pub expected_completion: Option<NaiveDate>,
    pub instructions: Option<String>,
}

/// What the investigator decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationOutcome {
    /// Send the findings for review.
    FinalReview,
    Close,
    Regional,
    Agency,
    /// Record interim findings and keep investigating.
    Continue,
}

impl InvestigationOutcome {
    pub fn action(self) -> WorkflowAction {
        match self {
            InvestigationOutcome::FinalReview => WorkflowAction::CompleteInvestigation,
            InvestigationOutcome::Close => WorkflowAction::CloseInvestigation,
            InvestigationOutcome::Regional => WorkflowAction::EscalateRegional,
            InvestigationOutcome::Agency => WorkflowAction::EscalateAgency,
            InvestigationOutcome::Continue => WorkflowAction::StartInvestigation,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            InvestigationOutcome::FinalReview => "final_review",
            InvestigationOutcome::Close => "close",
            InvestigationOutcome::Regional => "regional",
            InvestigationOutcome::Agency => "agency",
            InvestigationOutcome::Continue => "continue",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FindingRequest {
    pub outcome: InvestigationOutcome,
    pub fraud_reason: Option<String>,
    #[serde(default)]
    pub fraud_tags: Vec<String>,
    pub closure_reason: Option<String>,
    pub regional_assignment: Option<String>,
    pub agency_assignment: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CloseRequest {
    pub closure_type: ClosureType,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressParams {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct AllocationResult {
    pub case: Case,
    pub assignment: CaseAssignment,
}

#[derive(Debug, Serialize)]
pub struct FindingResult {
    pub case: Case,
    pub finding: InvestigationFinding,
}

#[derive(Debug, Serialize)]
pub struct StageQueue {
    pub stage: Stage,
    pub statuses: Vec<CaseStatus>,
    pub items: Vec<Case>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn required<'a>(value: &'a Option<String>, message: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation(message.to_string())))
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// POST /api/v1/cases/{case_id}/actions
///
/// Apply a role action. Allocation and closure carry extra data and have
/// their own endpoints.
pub async fn apply_action(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<ActionRequest>,
) -> AppResult<Json<DataResponse<Case>>> {
    let action = input.action;
    if action.requires_payload() {
        return Err(AppError::BadRequest(format!(
            "Action '{action:?}' must use its dedicated endpoint"
        )));
    }
    user.ensure_role(action.allowed_roles())?;

    let case = activity::load_case(&state.pool, &case_id).await?;
    let updated = activity::change_status(
        &state.pool,
        &user,
        &case,
        StatusChange {
            status: action.target(),
            comment_type: action.comment_type(),
            comment: action_comment(action, input.comment.as_deref()),
            action_type: action_types::STATUS_CHANGE,
            details: json!({ "action": action }),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/cases/{case_id}/allocate
pub async fn allocate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<AllocateRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AllocationResult>>)> {
    user.ensure_role(WorkflowAction::Allocate.allowed_roles())?;
    input.validate()?;
    let case = activity::load_case(&state.pool, &case_id).await?;

    let assignment = AssignmentRepo::create(
        &state.pool,
        &CreateAssignment {
            case_id: case.case_id.clone(),
            investigation_type: input.investigation_type.trim().to_string(),
            assigned_to: input.assigned_to.trim().to_string(),
            priority: input.priority.unwrap_or_else(|| "Medium".to_string()),
            expected_completion: input.expected_completion,
            instructions: input.instructions,
            assigned_by: user.username.clone(),
        },
    )
    .await?;

    let summary = format!(
        "{} investigation assigned to {} ({} priority)",
        assignment.investigation_type, assignment.assigned_to, assignment.priority
    );
    let updated = activity::change_status(
        &state.pool,
        &user,
        &case,
        StatusChange {
            status: WorkflowAction::Allocate.target(),
            comment_type: WorkflowAction::Allocate.comment_type(),
            comment: action_comment(WorkflowAction::Allocate, Some(&summary)),
            action_type: action_types::ALLOCATION,
            details: json!({
                "assignment_id": assignment.id,
                "assigned_to": assignment.assigned_to,
                "investigation_type": assignment.investigation_type,
            }),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AllocationResult {
                case: updated,
                assignment,
            },
        }),
    ))
}

/// POST /api/v1/cases/{case_id}/findings
///
/// Record the investigator's findings and route the case by outcome.
pub async fn record_finding(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<FindingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FindingResult>>)> {
    let action = input.outcome.action();
    user.ensure_role(action.allowed_roles())?;
    match input.outcome {
        InvestigationOutcome::Close => {
            required(&input.closure_reason, "closure_reason is required to close")?;
        }
        InvestigationOutcome::Regional => {
            required(&input.regional_assignment, "regional_assignment is required")?;
        }
        InvestigationOutcome::Agency => {
            required(&input.agency_assignment, "agency_assignment is required")?;
        }
        InvestigationOutcome::FinalReview | InvestigationOutcome::Continue => {}
    }

    let case = activity::load_case(&state.pool, &case_id).await?;
    let finding = FindingRepo::create(
        &state.pool,
        &CreateFinding {
            case_id: case.case_id.clone(),
            action_type: input.outcome.as_str().to_string(),
            fraud_reason: input.fraud_reason,
            fraud_tags: (!input.fraud_tags.is_empty()).then(|| json!(input.fraud_tags)),
            closure_reason: input.closure_reason,
            regional_assignment: input.regional_assignment,
            agency_assignment: input.agency_assignment,
            comments: input.comments,
            reviewed_by: user.username.clone(),
        },
    )
    .await?;

    let note = finding
        .comments
        .as_deref()
        .or(finding.closure_reason.as_deref())
        .or(finding.fraud_reason.as_deref());
    let updated = activity::change_status(
        &state.pool,
        &user,
        &case,
        StatusChange {
            status: action.target(),
            comment_type: action.comment_type(),
            comment: action_comment(action, note),
            action_type: action_types::INVESTIGATION_FINDING,
            details: json!({ "finding_id": finding.id, "outcome": input.outcome }),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: FindingResult {
                case: updated,
                finding,
            },
        }),
    ))
}

/// GET /api/v1/cases/{case_id}/findings
pub async fn list_findings(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<InvestigationFinding>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let findings = FindingRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: findings }))
}

/// GET /api/v1/cases/{case_id}/assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<CaseAssignment>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let assignments = AssignmentRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// GET /api/v1/assignments/mine
///
/// Assignments addressed to the caller.
pub async fn my_assignments(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CaseAssignment>>>> {
    let assignments = AssignmentRepo::list_for_assignee(&state.pool, &user.username).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// POST /api/v1/cases/{case_id}/close
///
/// Actioner closure with a disposition.
pub async fn close_case(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<CloseRequest>,
) -> AppResult<Json<DataResponse<Case>>> {
    user.ensure_role(WorkflowAction::Close.allowed_roles())?;
    let case = activity::load_case(&state.pool, &case_id).await?;

    let label = input.closure_type.label();
    let remarks = input
        .remarks
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    let text = match remarks {
        Some(r) => format!("{label}. {r}"),
        None => label.to_string(),
    };

    let mut tx = tathya_db::begin_write(&state.pool).await?;
    let updated = CaseRepo::close(
        &mut *tx,
        &case.case_id,
        WorkflowAction::Close.target().as_str(),
        label,
        remarks,
        Utc::now(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::CaseNotFound(case.case_id.clone())))?;
    activity::record_change(
        &mut tx,
        &user,
        &case,
        StatusChange {
            status: WorkflowAction::Close.target(),
            comment_type: WorkflowAction::Close.comment_type(),
            comment: action_comment(WorkflowAction::Close, Some(&text)),
            action_type: action_types::CASE_CLOSE,
            details: json!({ "closure_type": label }),
        },
    )
    .await?;
    tx.commit().await?;
    tracing::info!(user_id = user.user_id, case_id = %case.case_id, closure_type = label, "Case closed");

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/cases/{case_id}/status
///
/// Admin override to any known status.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(case_id): Path<String>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<DataResponse<Case>>> {
    let status = CaseStatus::parse(&input.status).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown status '{}'",
            input.status
        )))
    })?;
    let case = activity::load_case(&state.pool, &case_id).await?;

    let reason = input.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let comment = match reason {
        Some(r) => format!("STATUS SET TO {status}: {r}"),
        None => format!("STATUS SET TO {status}"),
    };
    let updated = activity::change_status(
        &state.pool,
        &admin,
        &case,
        StatusChange {
            status,
            comment_type: "Status Override",
            comment,
            action_type: action_types::STATUS_OVERRIDE,
            details: json!({ "reason": reason }),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Queues and progress
// ---------------------------------------------------------------------------

/// GET /api/v1/queues/{stage}
pub async fn stage_queue(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(stage): Path<String>,
) -> AppResult<Json<DataResponse<StageQueue>>> {
    let stage = Stage::parse(&stage)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown stage '{stage}'")))?;
    let statuses = stage.queue_statuses();
    let names: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
    let items = CaseRepo::list_by_statuses(&state.pool, &names).await?;

    Ok(Json(DataResponse {
        data: StageQueue {
            stage,
            statuses: statuses.to_vec(),
            items,
        },
    }))
}

/// GET /api/v1/cases/{case_id}/progress
pub async fn case_progress(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Progress>>> {
    let case = activity::load_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse {
        data: workflow::progress(&case.status),
    }))
}

/// GET /api/v1/workflow/progress?status=
///
/// Progress for an arbitrary status string. Never fails.
pub async fn status_progress(
    _user: AuthUser,
    Query(params): Query<ProgressParams>,
) -> Json<DataResponse<Progress>> {
    Json(DataResponse {
        data: workflow::progress(&params.status),
    })
}
