//! Fraud risk scoring: ad-hoc assessment, case assessment from stored
//! evidence, and applicant profile anomaly rules.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_core::error::CoreError;
use tathya_core::risk::{self, ApplicantProfile, RiskAssessment, RiskComponents, RiskEvidence};
use tathya_db::models::document::CaseDocument;
use tathya_db::models::verification::check_types;
use tathya_db::repositories::{CaseRepo, DocumentRepo, VerificationRepo};
use tathya_db::DbPool;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Manual values for components the system has no evidence for.
#[derive(Debug, Default, Deserialize)]
pub struct ComponentOverrides {
    pub face_match_score: Option<f64>,
    pub credit_report_flags: Option<f64>,
    pub location_device_risk: Option<f64>,
    pub metadata_anomalies: Option<f64>,
}

impl ComponentOverrides {
    fn apply(&self, mut components: RiskComponents) -> RiskComponents {
        let set = |target: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *target = v.clamp(0.0, 100.0);
            }
        };
        set(&mut components.face_match_score, self.face_match_score);
        set(&mut components.credit_report_flags, self.credit_report_flags);
        set(&mut components.location_device_risk, self.location_device_risk);
        set(&mut components.metadata_anomalies, self.metadata_anomalies);
        components
    }
}

#[derive(Debug, Serialize)]
pub struct CaseRiskAssessment {
    pub case_id: String,
    pub evidence: RiskEvidence,
    pub assessment: RiskAssessment,
}

#[derive(Debug, Serialize)]
pub struct AnomalyReport {
    pub anomalies: Vec<&'static str>,
    pub anomaly_count: usize,
}

fn mentions(doc: &CaseDocument, needle: &str) -> bool {
    doc.document_type
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
        .contains(needle)
        || doc.original_filename.to_lowercase().contains(needle)
}

/// Evidence derivable from uploaded documents alone.
pub fn document_evidence(documents: &[CaseDocument]) -> RiskEvidence {
    RiskEvidence {
        document_count: documents.len(),
        has_salary_docs: documents.iter().any(|d| mentions(d, "salary")),
        has_bank_docs: documents.iter().any(|d| mentions(d, "bank")),
        ..RiskEvidence::default()
    }
}

/// Face risk is the complement of the latest match percentage.
fn face_risk(result: &serde_json::Value) -> Option<f64> {
    result
        .get("match_percentage")
        .and_then(serde_json::Value::as_f64)
        .map(|pct| (100.0 - pct).clamp(0.0, 100.0))
}

/// Gather documents and the latest stored checks for a case, then score it.
pub async fn assess_case(
    pool: &DbPool,
    case_id: &str,
    overrides: &ComponentOverrides,
) -> AppResult<(RiskEvidence, RiskAssessment)> {
    let documents = DocumentRepo::list_for_case(pool, case_id).await?;
    let mut evidence = document_evidence(&documents);

    let latest = |check_type: &'static str| VerificationRepo::latest(pool, case_id, check_type);
    evidence.pan_valid = latest(check_types::PAN).await?.map(|r| r.passed);
    evidence.aadhaar_valid = latest(check_types::AADHAAR).await?.map(|r| r.passed);
    evidence.mobile_revoked = latest(check_types::MOBILE).await?.map(|r| !r.passed);

    let mut components = risk::components_from_evidence(&evidence);
    if let Some(face) = latest(check_types::FACE_MATCH)
        .await?
        .and_then(|r| face_risk(&r.result_json))
    {
        components.face_match_score = face;
    }
    Ok((evidence, risk::assess(overrides.apply(components))))
}

/// POST /api/v1/risk/assess
///
/// Score explicit component values. Nothing is stored.
pub async fn assess(
    _user: AuthUser,
    Json(components): Json<RiskComponents>,
) -> Json<DataResponse<RiskAssessment>> {
    Json(DataResponse {
        data: risk::assess(components),
    })
}

/// POST /api/v1/cases/{case_id}/risk
///
/// Score a case from its stored verifications and documents and save the
/// result on the case. The body may override the manual components.
pub async fn assess_and_record(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    overrides: Option<Json<ComponentOverrides>>,
) -> AppResult<Json<DataResponse<CaseRiskAssessment>>> {
    let case = activity::load_case(&state.pool, &case_id).await?;
    let overrides = overrides.map(|Json(o)| o).unwrap_or_default();
    let (evidence, assessment) = assess_case(&state.pool, &case.case_id, &overrides).await?;

    CaseRepo::record_risk(
        &state.pool,
        &case.case_id,
        assessment.risk_score,
        assessment.risk_category.as_str(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::CaseNotFound(case.case_id.clone())))?;

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::RISK_ASSESSMENT,
        json!({
            "risk_score": assessment.risk_score,
            "risk_category": assessment.risk_category,
            "components": assessment.component_scores,
        }),
    )
    .await?;
    tracing::info!(
        user_id = user.user_id,
        case_id = %case.case_id,
        risk_score = assessment.risk_score,
        category = assessment.risk_category.as_str(),
        "Risk assessed",
    );

    Ok(Json(DataResponse {
        data: CaseRiskAssessment {
            case_id: case.case_id,
            evidence,
            assessment,
        },
    }))
}

/// POST /api/v1/risk/anomalies
pub async fn profile_anomalies(
    _user: AuthUser,
    Json(profile): Json<ApplicantProfile>,
) -> Json<DataResponse<AnomalyReport>> {
    let anomalies = risk::detect_profile_anomalies(&profile);
    Json(DataResponse {
        data: AnomalyReport {
            anomaly_count: anomalies.len(),
            anomalies,
        },
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn doc(document_type: Option<&str>, filename: &str) -> CaseDocument {
        CaseDocument {
            id: 1,
            case_id: "C1".into(),
            document_type: document_type.map(str::to_string),
            original_filename: filename.into(),
            stored_path: String::new(),
            content_type: None,
            file_size: 10,
            uploaded_by: "u".into(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn document_evidence_detects_income_proofs() {
        let docs = [
            doc(Some("Salary Slip"), "march.pdf"),
            doc(None, "HDFC_Bank_Statement.pdf"),
            doc(Some("PAN Card"), "pan.jpg"),
        ];
        let evidence = document_evidence(&docs);
        assert_eq!(evidence.document_count, 3);
        assert!(evidence.has_salary_docs);
        assert!(evidence.has_bank_docs);
    }

    #[test]
    fn overrides_are_clamped() {
        let overrides = ComponentOverrides {
            credit_report_flags: Some(150.0),
            ..ComponentOverrides::default()
        };
        let components = overrides.apply(RiskComponents::default());
        assert_eq!(components.credit_report_flags, 100.0);
        assert_eq!(components.face_match_score, 40.0);
    }

    #[test]
    fn face_risk_inverts_match() {
        assert_eq!(face_risk(&json!({"match_percentage": 92.0})), Some(8.0));
        assert_eq!(face_risk(&json!({})), None);
    }
}
