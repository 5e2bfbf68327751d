//! Case intake: create, list, get, patch, and comments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::case_id::generate_case_id;
use tathya_core::error::CoreError;
use tathya_core::identity;
use tathya_core::roles::ROLE_INITIATOR;
use tathya_core::workflow::CaseStatus;
use tathya_db::models::case::{Case, CaseFilter, CasePage, CreateCase, UpdateCase};
use tathya_db::models::comment::CaseComment;
use tathya_db::repositories::{CaseRepo, CommentRepo};
use validator::Validate;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /cases`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCaseRequest {
    /// Generated when omitted.
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    pub case_id: Option<String>,
    pub category: Option<String>,
    pub referred_by: Option<String>,
    #[validate(length(min = 1, message = "is required"))]
    pub case_type: String,
    pub case_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "is required"))]
    pub case_description: String,
    pub customer_name: Option<String>,
    pub lan: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub loan_amount: Option<f64>,
    pub product: Option<String>,
    pub branch_location: Option<String>,
    pub region: Option<String>,
    pub pan: Option<String>,
    pub aadhaar: Option<String>,
    pub mobile_number: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email_id: Option<String>,
    pub disbursement_date: Option<NaiveDate>,
    /// Type-specific fields, stored as a JSON object.
    pub case_details: Option<serde_json::Value>,
    pub priority: Option<String>,
    /// Submit immediately instead of saving as a draft.
    #[serde(default)]
    pub submit: bool,
}

/// Request body for `PATCH /cases/{case_id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCaseRequest {
    pub category: Option<String>,
    pub referred_by: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub case_type: Option<String>,
    pub case_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub case_description: Option<String>,
    pub customer_name: Option<String>,
    pub lan: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub loan_amount: Option<f64>,
    pub product: Option<String>,
    pub branch_location: Option<String>,
    pub region: Option<String>,
    pub pan: Option<String>,
    pub aadhaar: Option<String>,
    pub mobile_number: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email_id: Option<String>,
    pub disbursement_date: Option<NaiveDate>,
    pub case_details: Option<serde_json::Value>,
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub comment: String,
    pub comment_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalised identity fields. Empty strings are treated as absent.
#[derive(Debug)]
struct IdentityFields {
    pan: Option<String>,
    aadhaar: Option<String>,
    mobile_number: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_identity(
    pan: &Option<String>,
    aadhaar: &Option<String>,
    mobile: &Option<String>,
) -> AppResult<IdentityFields> {
    let pan = match present(pan) {
        Some(raw) => {
            let pan = identity::normalize_pan(raw);
            if !identity::is_valid_pan_format(&pan) {
                return Err(AppError::Core(CoreError::Validation(
                    "pan must match the format AAAAA9999A".into(),
                )));
            }
            Some(pan)
        }
        None => None,
    };

    let aadhaar = match present(aadhaar) {
        Some(raw) => {
            let cleaned = identity::clean_aadhaar(raw);
            if !identity::is_valid_aadhaar_format(&cleaned) {
                return Err(AppError::Core(CoreError::Validation(
                    "aadhaar must have 12 digits".into(),
                )));
            }
            Some(cleaned)
        }
        None => None,
    };

    let mobile_number = match present(mobile) {
        Some(raw) => Some(identity::normalize_mobile(raw).ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "mobile_number must have 10 digits".into(),
            ))
        })?),
        None => None,
    };

    Ok(IdentityFields {
        pan,
        aadhaar,
        mobile_number,
    })
}

fn check_details(details: &Option<serde_json::Value>) -> AppResult<()> {
    match details {
        Some(value) if !value.is_object() => Err(AppError::Core(CoreError::Validation(
            "case_details must be a JSON object".into(),
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

/// POST /api/v1/cases
pub async fn create_case(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCaseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Case>>)> {
    user.ensure_role(&[ROLE_INITIATOR])?;
    input.validate()?;
    check_details(&input.case_details)?;
    let ids = normalize_identity(&input.pan, &input.aadhaar, &input.mobile_number)?;

    let case_id = match present(&input.case_id) {
        Some(id) => id.to_string(),
        None => generate_case_id(),
    };
    let status = if input.submit {
        CaseStatus::Submitted
    } else {
        CaseStatus::Draft
    };

    let create = CreateCase {
        case_id,
        category: input.category,
        referred_by: input.referred_by,
        case_type: input.case_type.trim().to_string(),
        case_date: input.case_date,
        case_description: input.case_description,
        customer_name: input.customer_name,
        lan: input.lan,
        loan_amount: input.loan_amount,
        product: input.product,
        branch_location: input.branch_location,
        region: input.region,
        pan: ids.pan,
        aadhaar: ids.aadhaar,
        mobile_number: ids.mobile_number,
        email_id: input.email_id,
        disbursement_date: input.disbursement_date,
        case_details: input.case_details,
        status: status.as_str().to_string(),
        priority: input.priority,
        created_by: user.username.clone(),
    };

    let case = CaseRepo::create(&state.pool, &create).await?;

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::CASE_CREATE,
        json!({
            "case_type": case.case_type,
            "status": case.status,
            "loan_amount": case.loan_amount,
        }),
    )
    .await?;
    tracing::info!(user_id = user.user_id, case_id = %case.case_id, status = %case.status, "Case created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: case })))
}

/// GET /api/v1/cases?status=&case_type=&created_by=&region=&search=&limit=&offset=
pub async fn list_cases(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(mut filter): Query<CaseFilter>,
) -> AppResult<Json<DataResponse<CasePage>>> {
    // Legacy spellings select the stored status.
    if let Some(status) = filter.status.as_deref().and_then(CaseStatus::parse) {
        filter.status = Some(status.as_str().to_string());
    }
    let items = CaseRepo::list(&state.pool, &filter).await?;
    let total = CaseRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: CasePage { items, total },
    }))
}

/// GET /api/v1/cases/{case_id}
pub async fn get_case(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Case>>> {
    let case = activity::load_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: case }))
}

/// PATCH /api/v1/cases/{case_id}
///
/// Patch descriptive fields. Status changes go through the workflow routes.
pub async fn update_case(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<UpdateCaseRequest>,
) -> AppResult<Json<DataResponse<Case>>> {
    user.ensure_role(&[ROLE_INITIATOR])?;
    input.validate()?;
    check_details(&input.case_details)?;
    let ids = normalize_identity(&input.pan, &input.aadhaar, &input.mobile_number)?;

    let patch = UpdateCase {
        category: input.category,
        referred_by: input.referred_by,
        case_type: input.case_type,
        case_date: input.case_date,
        case_description: input.case_description,
        customer_name: input.customer_name,
        lan: input.lan,
        loan_amount: input.loan_amount,
        product: input.product,
        branch_location: input.branch_location,
        region: input.region,
        pan: ids.pan,
        aadhaar: ids.aadhaar,
        mobile_number: ids.mobile_number,
        email_id: input.email_id,
        disbursement_date: input.disbursement_date,
        case_details: input.case_details,
        priority: input.priority,
    };

    let case = CaseRepo::update(&state.pool, &case_id, &patch)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::CaseNotFound(case_id.clone())))?;

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::CASE_UPDATE,
        json!({ "fields": patched_fields(&patch) }),
    )
    .await?;

    Ok(Json(DataResponse { data: case }))
}

/// Names of the fields a patch sets.
fn patched_fields(patch: &UpdateCase) -> Vec<&'static str> {
    let flags = [
        ("category", patch.category.is_some()),
        ("referred_by", patch.referred_by.is_some()),
        ("case_type", patch.case_type.is_some()),
        ("case_date", patch.case_date.is_some()),
        ("case_description", patch.case_description.is_some()),
        ("customer_name", patch.customer_name.is_some()),
        ("lan", patch.lan.is_some()),
        ("loan_amount", patch.loan_amount.is_some()),
        ("product", patch.product.is_some()),
        ("branch_location", patch.branch_location.is_some()),
        ("region", patch.region.is_some()),
        ("pan", patch.pan.is_some()),
        ("aadhaar", patch.aadhaar.is_some()),
        ("mobile_number", patch.mobile_number.is_some()),
        ("email_id", patch.email_id.is_some()),
        ("disbursement_date", patch.disbursement_date.is_some()),
        ("case_details", patch.case_details.is_some()),
        ("priority", patch.priority.is_some()),
    ];
    flags
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/cases/{case_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<CaseComment>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let comments = CommentRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/cases/{case_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    Json(input): Json<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CaseComment>>)> {
    input.validate()?;
    let case = activity::load_case(&state.pool, &case_id).await?;
    let comment_type = present(&input.comment_type).unwrap_or("General").to_string();

    let comment = activity::add_comment(
        &state.pool,
        &case.case_id,
        &comment_type,
        input.comment.trim().to_string(),
        &user.username,
    )
    .await?;

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::COMMENT_ADD,
        json!({ "comment_id": comment.id, "comment_type": comment_type }),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
