//! Route definitions for the `/cases` resource and everything scoped to a
//! single case.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    audit, cases, communications, documents, legal, regulatory, reports, risk, verification,
    workflow,
};
use crate::state::AppState;
use crate::upload::MAX_UPLOAD_BYTES;

/// Routes mounted at `/cases`.
///
/// ```text
/// GET    /                            -> list_cases
/// POST   /                            -> create_case
/// GET    /{case_id}                   -> get_case
/// PATCH  /{case_id}                   -> update_case
/// GET    /{case_id}/comments          -> list_comments
/// POST   /{case_id}/comments          -> add_comment
/// GET    /{case_id}/documents         -> list_documents
/// POST   /{case_id}/documents         -> upload_document
/// POST   /{case_id}/actions           -> apply_action
/// POST   /{case_id}/allocate          -> allocate
/// GET    /{case_id}/assignments       -> list_assignments
/// GET    /{case_id}/findings          -> list_findings
/// POST   /{case_id}/findings          -> record_finding
/// POST   /{case_id}/close             -> close_case
/// PUT    /{case_id}/status            -> set_status (admin)
/// GET    /{case_id}/progress          -> case_progress
/// GET    /{case_id}/notices           -> list_notices
/// POST   /{case_id}/notices           -> draft_notice
/// POST   /{case_id}/communications          -> save_communication
/// POST   /{case_id}/communications/template -> generate_template
/// POST   /{case_id}/communications/export   -> export_communication
/// GET    /{case_id}/regulatory-reports      -> regulatory::list_for_case
/// POST   /{case_id}/regulatory-reports      -> create_fmr1
/// GET    /{case_id}/verifications     -> verification::list_for_case
/// POST   /{case_id}/risk              -> assess_and_record
/// GET    /{case_id}/reports/risk.pdf  -> risk_report
/// GET    /{case_id}/export            -> export_case
/// GET    /{case_id}/audit             -> case_audit_trail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cases::list_cases).post(cases::create_case))
        .route("/{case_id}", get(cases::get_case).patch(cases::update_case))
        .route(
            "/{case_id}/comments",
            get(cases::list_comments).post(cases::add_comment),
        )
        .route(
            "/{case_id}/documents",
            get(documents::list_documents)
                .post(documents::upload_document)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/{case_id}/actions", post(workflow::apply_action))
        .route("/{case_id}/allocate", post(workflow::allocate))
        .route("/{case_id}/assignments", get(workflow::list_assignments))
        .route(
            "/{case_id}/findings",
            get(workflow::list_findings).post(workflow::record_finding),
        )
        .route("/{case_id}/close", post(workflow::close_case))
        .route("/{case_id}/status", put(workflow::set_status))
        .route("/{case_id}/progress", get(workflow::case_progress))
        .route(
            "/{case_id}/notices",
            get(legal::list_notices).post(legal::draft_notice),
        )
        .route(
            "/{case_id}/communications",
            post(communications::save_communication),
        )
        .route(
            "/{case_id}/communications/template",
            post(communications::generate_template),
        )
        .route(
            "/{case_id}/communications/export",
            post(communications::export_communication),
        )
        .route(
            "/{case_id}/regulatory-reports",
            get(regulatory::list_for_case).post(regulatory::create_fmr1),
        )
        .route(
            "/{case_id}/verifications",
            get(verification::list_for_case),
        )
        .route("/{case_id}/risk", post(risk::assess_and_record))
        .route("/{case_id}/reports/risk.pdf", get(reports::risk_report))
        .route("/{case_id}/export", get(reports::export_case))
        .route("/{case_id}/audit", get(audit::case_audit_trail))
}
