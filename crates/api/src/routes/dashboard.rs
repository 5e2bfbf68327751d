//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary   -> summary
/// GET /queues    -> queues
/// GET /pipeline  -> pipeline
/// GET /activity  -> recent_activity (?limit=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/queues", get(dashboard::queues))
        .route("/pipeline", get(dashboard::pipeline))
        .route("/activity", get(dashboard::recent_activity))
}
