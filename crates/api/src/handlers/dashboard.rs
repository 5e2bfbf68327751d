//! Dashboard aggregates: totals, per-status and per-type counts, stage queue
//! sizes, pipeline step counts and recent activity.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tathya_core::workflow::{CaseStatus, Stage, PIPELINE};
use tathya_db::models::audit::AuditLog;
use tathya_db::models::dashboard::{CaseTotals, CaseTypeCount, StatusCount};
use tathya_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_ACTIVITY_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub totals: CaseTotals,
    pub by_status: Vec<StatusCount>,
    pub by_case_type: Vec<CaseTypeCount>,
}

#[derive(Debug, Serialize)]
pub struct QueueSize {
    pub stage: Stage,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct PipelineCount {
    pub step: &'static str,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct PipelineSummary {
    pub steps: Vec<PipelineCount>,
    pub rejected: i64,
    /// Cases whose status is not a known value.
    pub unrecognised: i64,
}

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<i64>,
}

/// Fold raw status counts into per-stage queue sizes.
pub fn queue_sizes(counts: &[StatusCount]) -> Vec<QueueSize> {
    let by_status: HashMap<CaseStatus, i64> = counts
        .iter()
        .filter_map(|c| CaseStatus::parse(&c.status).map(|s| (s, c.count)))
        .fold(HashMap::new(), |mut acc, (s, n)| {
            *acc.entry(s).or_default() += n;
            acc
        });
    Stage::ALL
        .iter()
        .map(|stage| QueueSize {
            stage: *stage,
            count: stage
                .queue_statuses()
                .iter()
                .map(|s| by_status.get(s).copied().unwrap_or(0))
                .sum(),
        })
        .collect()
}

/// Fold raw status counts onto pipeline steps by position.
pub fn pipeline_summary(counts: &[StatusCount]) -> PipelineSummary {
    let mut steps: Vec<PipelineCount> = PIPELINE
        .iter()
        .map(|step| PipelineCount {
            step: step.name,
            count: 0,
        })
        .collect();
    let mut rejected = 0;
    let mut unrecognised = 0;

    for c in counts {
        match CaseStatus::parse(&c.status) {
            Some(CaseStatus::Rejected) => rejected += c.count,
            Some(status) => {
                if let Some(step) = usize::try_from(status.position())
                    .ok()
                    .and_then(|i| steps.get_mut(i))
                {
                    step.count += c.count;
                }
            }
            None => unrecognised += c.count,
        }
    }

    PipelineSummary {
        steps,
        rejected,
        unrecognised,
    }
}

/// GET /api/v1/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let totals = DashboardRepo::totals(&state.pool).await?;
    let by_status = DashboardRepo::status_counts(&state.pool).await?;
    let by_case_type = DashboardRepo::case_type_counts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: DashboardSummary {
            totals,
            by_status,
            by_case_type,
        },
    }))
}

/// GET /api/v1/dashboard/queues
pub async fn queues(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<QueueSize>>>> {
    let counts = DashboardRepo::status_counts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: queue_sizes(&counts),
    }))
}

/// GET /api/v1/dashboard/pipeline
pub async fn pipeline(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<PipelineSummary>>> {
    let counts = DashboardRepo::status_counts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: pipeline_summary(&counts),
    }))
}

/// GET /api/v1/dashboard/activity?limit=
pub async fn recent_activity(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ActivityParams>,
) -> AppResult<Json<DataResponse<Vec<AuditLog>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let entries = DashboardRepo::recent_activity(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
