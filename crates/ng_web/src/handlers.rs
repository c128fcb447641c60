use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use ng_core::{GeneratedItem, NewsCollection};
use ng_jobs::{GenerateRequest, JobSnapshot, JobStarted};

use crate::error::ApiError;
use crate::models::{CollectParams, HealthResponse};
use crate::state::AppState;

const MAX_COLLECT_COUNT: usize = 10;
const MAX_GENERATE_COUNT: usize = 5;
const MAX_DAYS: u32 = 30;

fn clamp_request(mut request: GenerateRequest) -> GenerateRequest {
    request.count = request.count.clamp(1, MAX_GENERATE_COUNT);
    request.days = request.days.clamp(1, MAX_DAYS);
    request
}

pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse::new("running"))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

pub async fn collect_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CollectParams>,
) -> Result<Json<NewsCollection>, ApiError> {
    let count = params.count.clamp(1, MAX_COLLECT_COUNT);
    let days = params.days.clamp(1, MAX_DAYS);

    info!("Collecting {} news articles...", count);
    let collection = state.collector.fetch_and_filter(count, Some(days)).await?;
    if collection.articles.is_empty() {
        return Err(ApiError::not_found(
            "No news articles found. Check API keys or try again later.",
        ));
    }
    info!("Collected {} articles", collection.articles.len());
    Ok(Json(collection))
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Vec<GeneratedItem>>, ApiError> {
    let items = state.orchestrator.generate_batch(clamp_request(request)).await?;
    Ok(Json(items))
}

pub async fn start_generate_job(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<JobStarted>, ApiError> {
    let started = state.orchestrator.start(clamp_request(request)).await;
    Ok(Json(started))
}

pub async fn job_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobSnapshot>, ApiError> {
    state
        .orchestrator
        .status(&job_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Job not found"))
}
