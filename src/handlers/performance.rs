use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::PerformanceMetric;
use crate::services::performance::{PerformanceService, RestaurantRanking, TrendAnalysis};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/performance/restaurants/rankings", get(get_restaurant_rankings))
        .route(
            "/performance/restaurants/:restaurant_id/metrics",
            post(generate_metrics).get(get_restaurant_metrics),
        )
        .route("/performance/restaurants/:restaurant_id/trends", get(get_restaurant_trends))
}

fn performance_service(state: &AppState) -> PerformanceService {
    PerformanceService::new(state.scope.clone())
}

#[derive(Debug, Deserialize)]
pub struct GenerateMetricsQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub months: i64,
}

#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    pub metric: String,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct MetricListResponse {
    pub total: usize,
    pub metrics: Vec<PerformanceMetric>,
}

/// POST /v1/performance/restaurants/:restaurant_id/metrics - aggregate one
/// calendar month of orders into a metric row
async fn generate_metrics(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Query(query): Query<GenerateMetricsQuery>,
) -> Result<Json<PerformanceMetric>, ApiError> {
    let metric = performance_service(&state)
        .generate_monthly_metrics(restaurant_id, query.year, query.month)
        .await?;

    Ok(Json(metric))
}

/// GET /v1/performance/restaurants/:restaurant_id/metrics - metric history,
/// most recent period first
async fn get_restaurant_metrics(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<MetricListResponse>, ApiError> {
    let metrics = performance_service(&state).get_restaurant_performance(restaurant_id).await?;
    Ok(Json(MetricListResponse { total: metrics.len(), metrics }))
}

/// GET /v1/performance/restaurants/:restaurant_id/trends - percentage
/// change across the last N months of metrics
async fn get_restaurant_trends(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<TrendAnalysis>, ApiError> {
    let analysis = performance_service(&state)
        .analyze_restaurant_trends(restaurant_id, query.months)
        .await?;

    Ok(Json(analysis))
}

/// GET /v1/performance/restaurants/rankings - top restaurants by a chosen
/// metric over the last month
async fn get_restaurant_rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingsQuery>,
) -> Result<Json<Vec<RestaurantRanking>>, ApiError> {
    let metric = query.metric.parse()?;
    let rankings = performance_service(&state).get_restaurant_rankings(metric, query.limit).await?;

    Ok(Json(rankings))
}
