use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Interaction, InteractionType};
use crate::services::InteractionService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/interactions", post(create_interaction).get(list_interactions))
        .route("/interactions/:interaction_id", get(get_interaction))
        .route("/interactions/restaurants/:restaurant_id", get(list_interactions_by_restaurant))
        .route("/interactions/contacts/:user_id", get(list_interactions_by_contact))
}

fn interaction_service(state: &AppState) -> InteractionService {
    InteractionService::new(state.scope.clone())
}

#[derive(Debug, Deserialize)]
pub struct InteractionCreateRequest {
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub interaction_type: InteractionType,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InteractionListResponse {
    pub total: usize,
    pub interactions: Vec<Interaction>,
}

impl From<Vec<Interaction>> for InteractionListResponse {
    fn from(interactions: Vec<Interaction>) -> Self {
        Self { total: interactions.len(), interactions }
    }
}

/// POST /v1/interactions - record a touchpoint with a restaurant
async fn create_interaction(
    State(state): State<AppState>,
    Json(payload): Json<InteractionCreateRequest>,
) -> Result<(StatusCode, Json<Interaction>), ApiError> {
    let interaction = interaction_service(&state)
        .create_interaction(payload.user_id, payload.restaurant_id, payload.interaction_type, payload.notes)
        .await?;

    Ok((StatusCode::CREATED, Json(interaction)))
}

/// GET /v1/interactions/:interaction_id - show a single interaction
async fn get_interaction(
    State(state): State<AppState>,
    Path(interaction_id): Path<Uuid>,
) -> Result<Json<Interaction>, ApiError> {
    let interaction = interaction_service(&state)
        .get_interaction_by_id(interaction_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Interaction not found"))?;

    Ok(Json(interaction))
}

/// GET /v1/interactions - list all interactions
async fn list_interactions(
    State(state): State<AppState>,
) -> Result<Json<InteractionListResponse>, ApiError> {
    let interactions = interaction_service(&state).get_all_interactions().await?;
    Ok(Json(interactions.into()))
}

/// GET /v1/interactions/restaurants/:restaurant_id - interactions for one
/// restaurant
async fn list_interactions_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<InteractionListResponse>, ApiError> {
    let interactions = interaction_service(&state)
        .get_interactions_by_restaurant(restaurant_id)
        .await?;

    Ok(Json(interactions.into()))
}

/// GET /v1/interactions/contacts/:user_id - interactions logged by one
/// contact
async fn list_interactions_by_contact(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<InteractionListResponse>, ApiError> {
    let interactions = interaction_service(&state).get_interactions_by_contact(user_id).await?;
    Ok(Json(interactions.into()))
}
