//! Route definitions for role queues and pipeline progress.

use axum::routing::get;
use axum::{Json, Router};
use tathya_core::workflow::{PipelineStep, PIPELINE};

use crate::handlers::workflow;
use crate::response::DataResponse;
use crate::state::AppState;

async fn pipeline_steps() -> Json<DataResponse<[PipelineStep; 9]>> {
    Json(DataResponse { data: PIPELINE })
}

/// Routes merged at the API root.
///
/// ```text
/// GET /queues/{stage}       -> stage_queue
/// GET /workflow/progress    -> status_progress (?status=)
/// GET /workflow/pipeline    -> pipeline step definitions (public)
/// GET /assignments/mine     -> my_assignments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/queues/{stage}", get(workflow::stage_queue))
        .route("/workflow/progress", get(workflow::status_progress))
        .route("/workflow/pipeline", get(pipeline_steps))
        .route("/assignments/mine", get(workflow::my_assignments))
}
