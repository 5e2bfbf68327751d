//! Route definitions for the `/notices` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::legal;
use crate::state::AppState;

/// Routes mounted at `/notices`. Drafting lives under `/cases/{case_id}`.
///
/// ```text
/// GET  /{id}        -> get_notice
/// POST /{id}/issue  -> issue_notice (legal reviewer)
/// GET  /{id}/pdf    -> notice_pdf
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(legal::get_notice))
        .route("/{id}/issue", post(legal::issue_notice))
        .route("/{id}/pdf", get(legal::notice_pdf))
}
