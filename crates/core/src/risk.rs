//! Fraud risk scoring.
//!
//! Seven weighted components, each a 0..=100 risk value (higher is riskier).
//! The overall score is the weight-scaled sum, clamped to 0..=100.

use serde::{Deserialize, Serialize};

pub const WEIGHT_FACE_MATCH: f64 = 20.0;
pub const WEIGHT_DOCUMENT_AUTHENTICITY: f64 = 20.0;
pub const WEIGHT_MOBILE_RISK: f64 = 15.0;
pub const WEIGHT_CREDIT_REPORT_FLAGS: f64 = 15.0;
pub const WEIGHT_INCOME_CONSISTENCY: f64 = 10.0;
pub const WEIGHT_LOCATION_DEVICE_RISK: f64 = 10.0;
pub const WEIGHT_METADATA_ANOMALIES: f64 = 10.0;

pub const LOW_RISK_MAX: f64 = 30.0;
pub const MEDIUM_RISK_MAX: f64 = 70.0;

/// Per-component risk values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskComponents {
    pub face_match_score: f64,
    pub document_authenticity: f64,
    pub mobile_risk: f64,
    pub credit_report_flags: f64,
    pub income_consistency: f64,
    pub location_device_risk: f64,
    pub metadata_anomalies: f64,
}

impl Default for RiskComponents {
    /// Baseline values used when a component has no evidence.
    fn default() -> Self {
        Self {
            face_match_score: 40.0,
            document_authenticity: 0.0,
            mobile_risk: 10.0,
            credit_report_flags: 20.0,
            income_consistency: 45.0,
            location_device_risk: 25.0,
            metadata_anomalies: 20.0,
        }
    }
}

impl RiskComponents {
    /// `(label, score, weight)` for each component, in report order.
    pub fn labelled(&self) -> [(&'static str, f64, f64); 7] {
        let labels = [
            "Face match",
            "Document authenticity",
            "Mobile risk",
            "Credit report flags",
            "Income consistency",
            "Location / device risk",
            "Metadata anomalies",
        ];
        let weighted = self.weighted();
        std::array::from_fn(|i| (labels[i], weighted[i].0, weighted[i].1))
    }

    fn weighted(&self) -> [(f64, f64); 7] {
        [
            (self.face_match_score, WEIGHT_FACE_MATCH),
            (self.document_authenticity, WEIGHT_DOCUMENT_AUTHENTICITY),
            (self.mobile_risk, WEIGHT_MOBILE_RISK),
            (self.credit_report_flags, WEIGHT_CREDIT_REPORT_FLAGS),
            (self.income_consistency, WEIGHT_INCOME_CONSISTENCY),
            (self.location_device_risk, WEIGHT_LOCATION_DEVICE_RISK),
            (self.metadata_anomalies, WEIGHT_METADATA_ANOMALIES),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskCategory::Low => "Approve",
            RiskCategory::Medium => "Manual Review",
            RiskCategory::High => "Reject",
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score <= LOW_RISK_MAX {
            RiskCategory::Low
        } else if score <= MEDIUM_RISK_MAX {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub recommendation: &'static str,
    pub component_scores: RiskComponents,
}

pub fn assess(components: RiskComponents) -> RiskAssessment {
    let total: f64 = components
        .weighted()
        .iter()
        .map(|(score, weight)| score * weight / 100.0)
        .sum();
    let risk_score = total.clamp(0.0, 100.0);
    let risk_category = RiskCategory::from_score(risk_score);
    RiskAssessment {
        risk_score,
        risk_category,
        recommendation: risk_category.recommendation(),
        component_scores: components,
    }
}

// ---------------------------------------------------------------------------
// Deriving components from verification evidence
// ---------------------------------------------------------------------------

/// Verification evidence gathered for a case. `None` means the check was not
/// run, which counts as passing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskEvidence {
    pub pan_valid: Option<bool>,
    pub aadhaar_valid: Option<bool>,
    pub mobile_revoked: Option<bool>,
    #[serde(default)]
    pub document_count: usize,
    #[serde(default)]
    pub has_salary_docs: bool,
    #[serde(default)]
    pub has_bank_docs: bool,
}

pub fn document_authenticity_risk(evidence: &RiskEvidence) -> f64 {
    let mut score: i32 = 0;
    if !evidence.pan_valid.unwrap_or(true) {
        score += 30;
    }
    if !evidence.aadhaar_valid.unwrap_or(true) {
        score += 30;
    }
    if evidence.document_count < 2 {
        score += 20;
    } else if evidence.document_count >= 3 {
        score -= 10;
    }
    f64::from(score.clamp(0, 100))
}

/// Build components from evidence, with the baseline for the rest.
pub fn components_from_evidence(evidence: &RiskEvidence) -> RiskComponents {
    RiskComponents {
        document_authenticity: document_authenticity_risk(evidence),
        mobile_risk: if evidence.mobile_revoked.unwrap_or(false) {
            70.0
        } else {
            10.0
        },
        income_consistency: if evidence.has_salary_docs && evidence.has_bank_docs {
            15.0
        } else {
            45.0
        },
        ..RiskComponents::default()
    }
}

// ---------------------------------------------------------------------------
// Applicant profile anomalies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApplicantProfile {
    pub age: u32,
    /// Monthly income.
    pub income: f64,
    pub loan_amount: f64,
    pub credit_score: u32,
    /// Years of work experience.
    pub experience: u32,
}

/// Rule-based inconsistencies in manually entered applicant data.
pub fn detect_profile_anomalies(p: &ApplicantProfile) -> Vec<&'static str> {
    let mut anomalies = Vec::new();
    if p.income > f64::from(p.age) * 2000.0 && p.age < 30 {
        anomalies.push("Unusually high income for age group");
    }
    if p.loan_amount > p.income * 60.0 {
        anomalies.push("Loan amount exceeds safe income multiple");
    }
    if p.credit_score < 600 && p.income > 80_000.0 {
        anomalies.push("Low credit score despite high income");
    }
    if i64::from(p.experience) > i64::from(p.age) - 18 {
        anomalies.push("Work experience exceeds possible working years");
    }
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_hundred() {
        let sum: f64 = RiskComponents::default()
            .weighted()
            .iter()
            .map(|(_, w)| w)
            .sum();
        assert_eq!(sum, 100.0);
    }

    #[test]
    fn all_max_components_is_high_risk() {
        let c = RiskComponents {
            face_match_score: 100.0,
            document_authenticity: 100.0,
            mobile_risk: 100.0,
            credit_report_flags: 100.0,
            income_consistency: 100.0,
            location_device_risk: 100.0,
            metadata_anomalies: 100.0,
        };
        let a = assess(c);
        assert_eq!(a.risk_score, 100.0);
        assert_eq!(a.risk_category, RiskCategory::High);
        assert_eq!(a.recommendation, "Reject");
    }

    #[test]
    fn clean_evidence_is_low_risk() {
        let evidence = RiskEvidence {
            pan_valid: Some(true),
            aadhaar_valid: Some(true),
            mobile_revoked: Some(false),
            document_count: 3,
            has_salary_docs: true,
            has_bank_docs: true,
        };
        let a = assess(components_from_evidence(&evidence));
        // 40*.2 + 0 + 10*.15 + 20*.15 + 15*.1 + 25*.1 + 20*.1
        assert!((a.risk_score - 18.5).abs() < 1e-9);
        assert_eq!(a.risk_category, RiskCategory::Low);
    }

    #[test]
    fn category_boundaries_are_inclusive() {
        assert_eq!(RiskCategory::from_score(30.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(30.1), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(70.0), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(70.1), RiskCategory::High);
    }

    #[test]
    fn document_risk_adds_and_clamps() {
        let bad = RiskEvidence {
            pan_valid: Some(false),
            aadhaar_valid: Some(false),
            document_count: 1,
            ..Default::default()
        };
        assert_eq!(document_authenticity_risk(&bad), 80.0);

        let many_docs = RiskEvidence {
            document_count: 4,
            ..Default::default()
        };
        assert_eq!(document_authenticity_risk(&many_docs), 0.0);
    }

    #[test]
    fn revoked_mobile_raises_mobile_risk() {
        let e = RiskEvidence {
            mobile_revoked: Some(true),
            ..Default::default()
        };
        assert_eq!(components_from_evidence(&e).mobile_risk, 70.0);
    }

    #[test]
    fn profile_anomalies() {
        let p = ApplicantProfile {
            age: 25,
            income: 90_000.0,
            loan_amount: 6_000_000.0,
            credit_score: 550,
            experience: 10,
        };
        let found = detect_profile_anomalies(&p);
        assert_eq!(found.len(), 4);

        let ok = ApplicantProfile {
            age: 40,
            income: 50_000.0,
            loan_amount: 1_000_000.0,
            credit_score: 750,
            experience: 15,
        };
        assert!(detect_profile_anomalies(&ok).is_empty());
    }
}
