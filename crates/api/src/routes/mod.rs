pub mod admin;
pub mod audit;
pub mod auth;
pub mod cases;
pub mod dashboard;
pub mod health;
pub mod legal;
pub mod regulatory;
pub mod risk;
pub mod verification;
pub mod workflow;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                get, deactivate
///
/// /cases                                           list, create
/// /cases/{case_id}                                 get, patch
/// /cases/{case_id}/comments                        list, add
/// /cases/{case_id}/documents                       list, upload (multipart)
/// /cases/{case_id}/actions                         apply workflow action
/// /cases/{case_id}/allocate                        allocate for investigation
/// /cases/{case_id}/findings                        list, record findings
/// /cases/{case_id}/assignments                     list
/// /cases/{case_id}/close                           actioner closure
/// /cases/{case_id}/status                          admin status override
/// /cases/{case_id}/progress                        pipeline progress
/// /cases/{case_id}/notices                         list, draft
/// /cases/{case_id}/communications                  save draft or sent record
/// /cases/{case_id}/communications/template         generate template text
/// /cases/{case_id}/communications/export           text file export
/// /cases/{case_id}/regulatory-reports              list, create FMR-1
/// /cases/{case_id}/verifications                   stored check results
/// /cases/{case_id}/risk                            assess and record
/// /cases/{case_id}/reports/risk.pdf                risk assessment PDF
/// /cases/{case_id}/export                          full JSON export
/// /cases/{case_id}/audit                           case audit trail
///
/// /queues/{stage}                                  cases in a role queue
/// /workflow/progress                               progress for a status
/// /workflow/pipeline                               pipeline step definitions
/// /assignments/mine                                caller's assignments
///
/// /notices/{id}                                    get
/// /notices/{id}/issue                              issue a draft
/// /notices/{id}/pdf                                notice PDF
///
/// /regulatory/pending                              cases awaiting FMR-1
/// /regulatory/reports                              list (?status=)
/// /regulatory/reports/{id}/submit                  mark submitted to RBI
/// /regulatory/analytics                            monthly and per-type totals
///
/// /verify/mobile                                   MNRL revocation check
/// /verify/pan                                      PAN verification
/// /verify/pan-aadhaar                              PAN-Aadhaar linkage
/// /verify/aadhaar                                  Aadhaar verification
/// /verify/id-format                                ID number format check
/// /verify/document                                 AI document analysis
/// /verify/face-match                               AI face match
/// /verify/ocr                                      AI field extraction
/// /ai/remarks                                      remark suggestions
///
/// /risk/assess                                     score explicit components
/// /risk/anomalies                                  applicant profile rules
///
/// /dashboard/summary                               totals and counts
/// /dashboard/queues                                per-stage queue sizes
/// /dashboard/pipeline                              per-step case counts
/// /dashboard/activity                              recent audit entries
///
/// /audit-logs                                      query (admin only)
/// /audit-logs/export                               JSON or CSV export
/// /audit-logs/integrity-check                      hash chain verification
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/cases", cases::router())
        .merge(workflow::router())
        .nest("/notices", legal::router())
        .nest("/regulatory", regulatory::router())
        .nest("/verify", verification::router())
        .nest("/ai", verification::ai_router())
        .nest("/risk", risk::router())
        .nest("/dashboard", dashboard::router())
        .nest("/audit-logs", audit::router())
}
