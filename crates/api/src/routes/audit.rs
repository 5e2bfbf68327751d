//! Route definitions for the `/audit-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/audit-logs`. Admin only.
///
/// ```text
/// GET /                  -> query_audit_logs
/// GET /export            -> export_audit_logs (?format=json|csv)
/// GET /integrity-check   -> check_integrity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::query_audit_logs))
        .route("/export", get(audit::export_audit_logs))
        .route("/integrity-check", get(audit::check_integrity))
}
