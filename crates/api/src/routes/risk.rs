//! Route definitions for the `/risk` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::risk;
use crate::state::AppState;

/// Routes mounted at `/risk`. Case scoring lives under `/cases/{case_id}`.
///
/// ```text
/// POST /assess     -> assess
/// POST /anomalies  -> profile_anomalies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assess", post(risk::assess))
        .route("/anomalies", post(risk::profile_anomalies))
}
