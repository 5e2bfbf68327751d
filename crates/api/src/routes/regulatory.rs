//! Route definitions for the `/regulatory` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::regulatory;
use crate::state::AppState;

/// Routes mounted at `/regulatory`. Report creation lives under
/// `/cases/{case_id}`.
///
/// ```text
/// GET  /pending               -> pending_cases
/// GET  /reports               -> list_reports (?status=)
/// POST /reports/{id}/submit   -> mark_submitted
/// GET  /analytics             -> analytics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(regulatory::pending_cases))
        .route("/reports", get(regulatory::list_reports))
        .route("/reports/{id}/submit", post(regulatory::mark_submitted))
        .route("/analytics", get(regulatory::analytics))
}
