//! Closure-stage communications: generate a template for a case, save it
//! as a draft or record it as sent, and export it as a text file.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::communication::{self, CommunicationType};
use tathya_core::error::CoreError;
use tathya_core::roles::{ROLE_ACTIONER, ROLE_LEGAL_REVIEWER};
use tathya_db::models::comment::CaseComment;
use tathya_db::repositories::FindingRepo;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::handlers::legal::notice_context;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const ROLES: &[&str] = &[ROLE_ACTIONER, ROLE_LEGAL_REVIEWER];

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template_type: CommunicationType,
}

#[derive(Debug, Serialize)]
pub struct CommunicationTemplate {
    pub template_type: CommunicationType,
    pub case_id: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveCommunicationRequest {
    pub template_type: CommunicationType,
    pub content: String,
    /// Record the communication as sent rather than as a draft.
    #[serde(default)]
    pub send: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub template_type: CommunicationType,
    pub content: String,
}

fn require_content(content: &str) -> AppResult<&str> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content is required".into(),
        )));
    }
    Ok(content)
}

/// POST /api/v1/cases/{case_id}/communications/template
pub async fn generate_template(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<TemplateRequest>,
) -> AppResult<Json<DataResponse<CommunicationTemplate>>> {
    user.ensure_role(ROLES)?;
    let case = activity::load_case(&state.pool, &case_id).await?;
    let finding = FindingRepo::latest_for_case(&state.pool, &case.case_id).await?;
    let ctx = notice_context(&case, finding.as_ref(), None, Vec::new());

    let content =
        communication::render_communication(input.template_type, &ctx, Utc::now().date_naive());
    Ok(Json(DataResponse {
        data: CommunicationTemplate {
            template_type: input.template_type,
            case_id: case.case_id,
            content,
        },
    }))
}

/// POST /api/v1/cases/{case_id}/communications
///
/// Store the (possibly edited) text on the case as a typed comment.
pub async fn save_communication(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<SaveCommunicationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CaseComment>>)> {
    user.ensure_role(ROLES)?;
    let content = require_content(&input.content)?;
    let case = activity::load_case(&state.pool, &case_id).await?;

    let comment = activity::add_comment(
        &state.pool,
        &case.case_id,
        &input.template_type.comment_type(input.send),
        communication::communication_record(
            input.template_type,
            content,
            &user.username,
            input.send,
        ),
        &user.username,
    )
    .await?;
    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::COMMUNICATION_SAVE,
        json!({
            "template_type": input.template_type,
            "sent": input.send,
            "comment_id": comment.id,
        }),
    )
    .await?;
    tracing::info!(
        user_id = user.user_id,
        case_id = %case.case_id,
        template_type = input.template_type.label(),
        sent = input.send,
        "Communication saved",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// POST /api/v1/cases/{case_id}/communications/export
pub async fn export_communication(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<ExportRequest>,
) -> AppResult<Response> {
    user.ensure_role(ROLES)?;
    let content = require_content(&input.content)?;
    let case = activity::load_case(&state.pool, &case_id).await?;

    let at = Utc::now().naive_utc();
    let body = communication::export_text(input.template_type, &case.case_id, content, at);
    let filename = communication::export_filename(input.template_type, &case.case_id, at);

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::COMMUNICATION_EXPORT,
        json!({ "template_type": input.template_type, "filename": filename }),
    )
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}
