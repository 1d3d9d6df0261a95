use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::CallPlan;
use crate::services::CallPlanService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/call-plans", post(create_call_plan))
        .route("/call-plans/due-calls", get(get_due_calls))
        .route("/call-plans/:call_plan_id/record-call", post(record_call))
}

fn call_plan_service(state: &AppState) -> CallPlanService {
    CallPlanService::new(state.scope.clone())
}

#[derive(Debug, Deserialize)]
pub struct CallPlanCreateRequest {
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub frequency_days: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DueCallsQuery {
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct RecordCallQuery {
    pub call_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CallPlanListResponse {
    pub total: usize,
    pub call_plans: Vec<CallPlan>,
}

/// POST /v1/call-plans - schedule recurring calls for a restaurant
async fn create_call_plan(
    State(state): State<AppState>,
    Json(payload): Json<CallPlanCreateRequest>,
) -> Result<(StatusCode, Json<CallPlan>), ApiError> {
    let call_plan = call_plan_service(&state)
        .create_call_plan(payload.restaurant_id, payload.user_id, payload.frequency_days, payload.notes)
        .await?;

    Ok((StatusCode::CREATED, Json(call_plan)))
}

/// GET /v1/call-plans/due-calls - plans due on or before the given date
/// (today by default)
async fn get_due_calls(
    State(state): State<AppState>,
    Query(query): Query<DueCallsQuery>,
) -> Result<Json<CallPlanListResponse>, ApiError> {
    let call_plans = call_plan_service(&state).get_due_calls(query.due_date).await?;
    Ok(Json(CallPlanListResponse { total: call_plans.len(), call_plans }))
}

/// POST /v1/call-plans/:call_plan_id/record-call - log a completed call and
/// advance the schedule
async fn record_call(
    State(state): State<AppState>,
    Path(call_plan_id): Path<Uuid>,
    Query(query): Query<RecordCallQuery>,
) -> Result<Json<CallPlan>, ApiError> {
    let call_plan = call_plan_service(&state)
        .record_call_made(call_plan_id, query.call_date)
        .await?
        .ok_or_else(|| ApiError::not_found("Call plan not found"))?;

    Ok(Json(call_plan))
}
