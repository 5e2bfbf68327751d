//! Identity verification and AI-assisted document checks.
//!
//! Each check optionally names a `case_id`. When it does, the case must
//! exist and the outcome is stored against it so risk assessment can use it.
//! Every check is written to the audit log.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::identity::{self, IdFormatCheck, IdType};
use tathya_core::workflow::Stage;
use tathya_db::models::verification::{check_types, CreateVerificationRecord, VerificationRecord};
use tathya_db::repositories::VerificationRepo;
use tathya_verify::ai::{DocumentAnalysis, FaceMatch, OcrExtraction, RemarkSuggestions};
use tathya_verify::aadhaar::AadhaarCheck;
use tathya_verify::mnrl::MobileCheck;
use tathya_verify::pan::{LinkageCheck, PanCheck};
use tathya_verify::Attachment;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{MultipartForm, UploadedFile};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MobileRequest {
    pub mobile: String,
    pub case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PanRequest {
    pub pan: String,
    pub case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LinkageRequest {
    pub pan: String,
    pub aadhaar: String,
    pub case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AadhaarRequest {
    pub aadhaar: String,
    pub case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdFormatRequest {
    pub id_type: IdType,
    pub id_number: String,
    pub case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemarksRequest {
    pub stage: Stage,
    /// Summarised from the case record when omitted.
    pub case_id: Option<String>,
    pub summary: Option<String>,
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// One verification outcome ready to be stored.
struct Outcome<'a, T: Serialize> {
    check_type: &'a str,
    subject: String,
    passed: bool,
    /// `live`, `simulated`, or `local` for format-only checks.
    source: &'a str,
    result: &'a T,
}

/// Confirm the referenced case exists before any external call is made.
async fn resolve_case(state: &AppState, case_id: Option<String>) -> AppResult<Option<String>> {
    match case_id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty()) {
        Some(id) => Ok(Some(activity::load_case(&state.pool, &id).await?.case_id)),
        None => Ok(None),
    }
}

async fn record<T: Serialize>(
    state: &AppState,
    user: &AuthUser,
    case_id: Option<&str>,
    outcome: Outcome<'_, T>,
) -> AppResult<()> {
    if let Some(case_id) = case_id {
        let result_json = serde_json::to_value(outcome.result)
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        VerificationRepo::create(
            &state.pool,
            &CreateVerificationRecord {
                case_id: Some(case_id.to_string()),
                check_type: outcome.check_type.to_string(),
                subject: outcome.subject.clone(),
                passed: outcome.passed,
                source: outcome.source.to_string(),
                result_json,
                checked_by: user.username.clone(),
            },
        )
        .await?;
    }

    activity::audit(
        &state.pool,
        user,
        case_id,
        action_types::VERIFICATION,
        json!({
            "check_type": outcome.check_type,
            "subject": outcome.subject,
            "passed": outcome.passed,
            "source": outcome.source,
        }),
    )
    .await?;
    tracing::info!(
        user_id = user.user_id,
        case_id = ?case_id,
        check_type = outcome.check_type,
        passed = outcome.passed,
        source = outcome.source,
        "Verification completed",
    );
    Ok(())
}

fn attachment(file: UploadedFile) -> Attachment {
    let mime_type = file.mime_type();
    Attachment::new(mime_type, file.bytes)
}

fn document_passed(analysis: &DocumentAnalysis) -> bool {
    !analysis.tampering_detected && !analysis.risk_level.eq_ignore_ascii_case("high")
}

// ---------------------------------------------------------------------------
// Registry checks
// ---------------------------------------------------------------------------

/// POST /api/v1/verify/mobile
pub async fn check_mobile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<MobileRequest>,
) -> AppResult<Json<DataResponse<MobileCheck>>> {
    let case_id = resolve_case(&state, input.case_id).await?;
    let check = state.verifier.check_mobile(&input.mobile).await?;
    record(
        &state,
        &user,
        case_id.as_deref(),
        Outcome {
            check_type: check_types::MOBILE,
            subject: check.mobile_number.clone(),
            passed: !check.is_revoked,
            source: check.source.as_str(),
            result: &check,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: check }))
}

/// POST /api/v1/verify/pan
pub async fn verify_pan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<PanRequest>,
) -> AppResult<Json<DataResponse<PanCheck>>> {
    let case_id = resolve_case(&state, input.case_id).await?;
    let check = state.verifier.verify_pan(&input.pan).await?;
    record(
        &state,
        &user,
        case_id.as_deref(),
        Outcome {
            check_type: check_types::PAN,
            subject: check.pan_number.clone(),
            passed: check.is_valid,
            source: check.source.as_str(),
            result: &check,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: check }))
}

/// POST /api/v1/verify/pan-aadhaar
pub async fn check_linkage(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<LinkageRequest>,
) -> AppResult<Json<DataResponse<LinkageCheck>>> {
    let case_id = resolve_case(&state, input.case_id).await?;
    let check = state
        .verifier
        .check_linkage(&input.pan, &input.aadhaar)
        .await?;
    record(
        &state,
        &user,
        case_id.as_deref(),
        Outcome {
            check_type: check_types::PAN_AADHAAR_LINK,
            subject: format!("{} / {}", check.pan_number, check.aadhaar_number),
            passed: check.is_linked,
            source: check.source.as_str(),
            result: &check,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: check }))
}

/// POST /api/v1/verify/aadhaar
pub async fn verify_aadhaar(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AadhaarRequest>,
) -> AppResult<Json<DataResponse<AadhaarCheck>>> {
    let case_id = resolve_case(&state, input.case_id).await?;
    let check = state.verifier.verify_aadhaar(&input.aadhaar).await?;
    record(
        &state,
        &user,
        case_id.as_deref(),
        Outcome {
            check_type: check_types::AADHAAR,
            subject: check.aadhaar_number.clone(),
            passed: check.is_valid,
            source: check.source.as_str(),
            result: &check,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: check }))
}

/// POST /api/v1/verify/id-format
///
/// Local format check only. Aadhaar numbers are masked in the response.
pub async fn validate_id_format(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<IdFormatRequest>,
) -> AppResult<Json<DataResponse<IdFormatCheck>>> {
    let case_id = resolve_case(&state, input.case_id).await?;
    let mut check = identity::validate_id_format(input.id_type, &input.id_number);
    if check.id_type == IdType::AadhaarCard {
        check.id_number = identity::mask_aadhaar(&check.id_number);
    }
    record(
        &state,
        &user,
        case_id.as_deref(),
        Outcome {
            check_type: check_types::ID_FORMAT,
            subject: format!("{}: {}", check.id_type.label(), check.id_number),
            passed: check.valid,
            source: "local",
            result: &check,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: check }))
}

// ---------------------------------------------------------------------------
// AI checks
// ---------------------------------------------------------------------------

/// POST /api/v1/verify/document
///
/// Multipart: `file`, optional `document_type` and `case_id`.
pub async fn analyze_document(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<DocumentAnalysis>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let case_id = resolve_case(&state, form.text("case_id")).await?;
    let document_type = form
        .text("document_type")
        .unwrap_or_else(|| "Document".to_string());
    let file = form.take_file("file")?;
    let filename = file.filename.clone();

    let analysis = state
        .ai
        .analyze_document(&document_type, &attachment(file))
        .await?;
    record(
        &state,
        &user,
        case_id.as_deref(),
        Outcome {
            check_type: check_types::DOCUMENT_ANALYSIS,
            subject: format!("{document_type}: {filename}"),
            passed: document_passed(&analysis),
            source: analysis.source.as_str(),
            result: &analysis,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: analysis }))
}

/// POST /api/v1/verify/face-match
///
/// Multipart: `reference` and `candidate` images, optional `case_id`.
pub async fn face_match(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<FaceMatch>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let case_id = resolve_case(&state, form.text("case_id")).await?;
    let reference = form.take_file("reference")?;
    let candidate = form.take_file("candidate")?;
    let subject = format!("{} vs {}", reference.filename, candidate.filename);

    let result = state
        .ai
        .face_match(&attachment(reference), &attachment(candidate))
        .await?;
    record(
        &state,
        &user,
        case_id.as_deref(),
        Outcome {
            check_type: check_types::FACE_MATCH,
            subject,
            passed: result.verification_status == "PASSED",
            source: result.source.as_str(),
            result: &result,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/verify/ocr
///
/// Multipart: `file` and optional `document_type`. Nothing is stored.
pub async fn extract_fields(
    State(state): State<AppState>,
    _user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<OcrExtraction>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let document_type = form
        .text("document_type")
        .unwrap_or_else(|| "Document".to_string());
    let file = form.take_file("file")?;
    let extraction = state
        .ai
        .extract_fields(&document_type, &attachment(file))
        .await?;
    Ok(Json(DataResponse { data: extraction }))
}

/// POST /api/v1/ai/remarks
pub async fn suggest_remarks(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<RemarksRequest>,
) -> AppResult<Json<DataResponse<RemarkSuggestions>>> {
    let summary = match (input.summary, input.case_id) {
        (Some(summary), _) if !summary.trim().is_empty() => summary,
        (_, Some(case_id)) => {
            let case = activity::load_case(&state.pool, &case_id).await?;
            format!(
                "{} case {} ({}): {}",
                case.case_type, case.case_id, case.status, case.case_description
            )
        }
        _ => String::new(),
    };
    let suggestions = state.ai.suggest_remarks(input.stage, &summary).await?;
    Ok(Json(DataResponse { data: suggestions }))
}

/// GET /api/v1/cases/{case_id}/verifications
pub async fn list_for_case(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<VerificationRecord>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let records = VerificationRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: records }))
}

#[cfg(test)]
mod tests {
    use tathya_verify::Source;

    use super::*;

    fn analysis(tampered: bool, risk: &str) -> DocumentAnalysis {
        DocumentAnalysis {
            authenticity_score: 80.0,
            tampering_detected: tampered,
            risk_level: risk.into(),
            extracted_data: json!({}),
            anomalies_found: vec![],
            confidence_explanation: String::new(),
            source: Source::Simulated,
        }
    }

    #[test]
    fn document_passes_only_when_clean() {
        assert!(document_passed(&analysis(false, "Low")));
        assert!(!document_passed(&analysis(true, "Low")));
        assert!(!document_passed(&analysis(false, "HIGH")));
    }
}
