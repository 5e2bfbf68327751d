//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod assignment_repo;
pub mod audit_repo;
pub mod case_repo;
pub mod comment_repo;
pub mod dashboard_repo;
pub mod document_repo;
pub mod finding_repo;
pub mod legal_notice_repo;
pub mod regulatory_report_repo;
pub mod user_repo;
pub mod verification_repo;

pub use assignment_repo::AssignmentRepo;
pub use audit_repo::AuditLogRepo;
pub use case_repo::CaseRepo;
pub use comment_repo::CommentRepo;
pub use dashboard_repo::DashboardRepo;
pub use document_repo::DocumentRepo;
pub use finding_repo::FindingRepo;
pub use legal_notice_repo::LegalNoticeRepo;
pub use regulatory_report_repo::RegulatoryReportRepo;
pub use user_repo::UserRepo;
pub use verification_repo::VerificationRepo;
