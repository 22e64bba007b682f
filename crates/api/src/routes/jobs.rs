//! Manual job trigger and job status endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::DailyTaskLogRepository;

/// Query parameters for the manual trigger.
#[derive(Debug, Deserialize)]
pub struct TriggerParams {
    /// Clear today's claim before triggering (operator force-rerun path).
    #[serde(default)]
    pub force: bool,
}

/// Manual trigger response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TriggerResponse {
    pub job: String,
    /// "accepted" if the run was queued, "already_ran" otherwise.
    pub status: String,
    pub run_date: NaiveDate,
}

/// Status of one named job.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JobStatus {
    pub job: String,
    pub last_run_date: Option<NaiveDate>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// "completed", "failed", or "unresolved" for a claimed run that never
    /// recorded an outcome (crash or still in flight).
    pub outcome: Option<String>,
    pub detail: Option<String>,
}

/// Job status listing.
#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    pub jobs: Vec<JobStatus>,
}

/// POST /api/v1/jobs/:name/run
///
/// Queues the named job now, bypassing the cadence timer but not the
/// daily-run guard: if today's claim already exists the trigger reports
/// "already_ran" and queues nothing. `?force=true` clears today's claim
/// first so operators can recover a ran-but-incomplete day.
pub async fn trigger_job(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<TriggerParams>,
) -> Result<(StatusCode, Json<TriggerResponse>), ApiError> {
    let Some(job) = state.registry.get(&name) else {
        return Err(ApiError::NotFound(format!("Unknown job: {}", name)));
    };

    let guard = DailyTaskLogRepository::new(state.pool.clone());
    let today = Utc::now().date_naive();

    if params.force {
        let cleared = guard.clear_claim(job.name(), today).await?;
        if cleared {
            warn!(job = job.name(), run_date = %today, "Cleared daily claim for forced rerun");
        }
    }

    // Synchronous pre-check so the caller gets an accurate answer; the
    // guard inside the job still decides authoritatively under races.
    if guard.has_run(job.name(), today).await? {
        return Ok((
            StatusCode::OK,
            Json(TriggerResponse {
                job: name,
                status: "already_ran".to_string(),
                run_date: today,
            }),
        ));
    }

    info!(job = job.name(), "Manual trigger accepted");
    tokio::spawn(async move {
        if let Err(e) = job.execute().await {
            error!(job = job.name(), error = %e, "Manually triggered job failed");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(TriggerResponse {
            job: name,
            status: "accepted".to_string(),
            run_date: today,
        }),
    ))
}

/// GET /api/v1/jobs
///
/// Last run timestamp and outcome per registered job.
pub async fn job_status(State(state): State<AppState>) -> Result<Json<JobStatusResponse>, ApiError> {
    let guard = DailyTaskLogRepository::new(state.pool.clone());
    let mut jobs = Vec::new();

    for name in state.registry.names() {
        let status = match guard.last_run(name).await? {
            Some(run) => JobStatus {
                job: name.to_string(),
                last_run_date: Some(run.run_date),
                started_at: Some(run.started_at),
                completed_at: run.completed_at,
                outcome: Some(
                    run.outcome
                        .clone()
                        .unwrap_or_else(|| "unresolved".to_string()),
                ),
                detail: run.detail,
            },
            None => JobStatus {
                job: name.to_string(),
                last_run_date: None,
                started_at: None,
                completed_at: None,
                outcome: None,
                detail: None,
            },
        };
        jobs.push(status);
    }

    Ok(Json(JobStatusResponse { jobs }))
}
