//! Full case export as a single JSON document.

use serde::Serialize;
use tathya_core::types::Timestamp;
use tathya_db::models::assignment::CaseAssignment;
use tathya_db::models::case::Case;
use tathya_db::models::comment::CaseComment;
use tathya_db::models::document::CaseDocument;
use tathya_db::models::finding::InvestigationFinding;
use tathya_db::models::legal_notice::LegalNotice;
use tathya_db::models::verification::VerificationRecord;
use tathya_db::repositories::{
    AssignmentRepo, CommentRepo, DocumentRepo, FindingRepo, LegalNoticeRepo, VerificationRepo,
};
use tathya_db::DbPool;

use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct CaseExport {
    pub exported_at: Timestamp,
    pub exported_by: String,
    pub case: Case,
    pub comments: Vec<CaseComment>,
    pub documents: Vec<CaseDocument>,
    pub assignments: Vec<CaseAssignment>,
    pub findings: Vec<InvestigationFinding>,
    pub notices: Vec<LegalNotice>,
    pub verifications: Vec<VerificationRecord>,
}

impl CaseExport {
    /// Gather a case and everything recorded against it.
    pub async fn collect(pool: &DbPool, case: Case, exported_by: &str) -> AppResult<Self> {
        let id = case.case_id.as_str();
        let comments = CommentRepo::list_for_case(pool, id).await?;
        let documents = DocumentRepo::list_for_case(pool, id).await?;
        let assignments = AssignmentRepo::list_for_case(pool, id).await?;
        let findings = FindingRepo::list_for_case(pool, id).await?;
        let notices = LegalNoticeRepo::list_for_case(pool, id).await?;
        let verifications = VerificationRepo::list_for_case(pool, id).await?;

        Ok(Self {
            exported_at: chrono::Utc::now(),
            exported_by: exported_by.to_string(),
            case,
            comments,
            documents,
            assignments,
            findings,
            notices,
            verifications,
        })
    }
}
