use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{middleware, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthorizationFilter, RoleFilter};
use crate::error::ApiError;
use crate::models::{Restaurant, RestaurantStatus, UserRole};
use crate::repository::restaurant::RestaurantChanges;
use crate::services::RestaurantService;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let staff_or_admin: Arc<dyn AuthorizationFilter> =
        Arc::new(RoleFilter::any_of(vec![UserRole::Staff, UserRole::Admin]));

    Router::new()
        .route("/restaurants", post(create_restaurant))
        .route(
            "/restaurants/:restaurant_id",
            get(get_restaurant).put(update_restaurant).delete(delete_restaurant),
        )
        .route("/restaurants/:restaurant_id/status", patch(update_restaurant_status))
        .merge(
            Router::new()
                .route("/restaurants", get(list_restaurants))
                .route_layer(middleware::from_fn(state.auth.requires(staff_or_admin))),
        )
}

fn restaurant_service(state: &AppState) -> RestaurantService {
    RestaurantService::new(state.scope.clone())
}

#[derive(Debug, Deserialize)]
pub struct RestaurantCreateRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantUpdateRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: RestaurantStatus,
}

#[derive(Debug, Serialize)]
pub struct RestaurantListResponse {
    pub total: usize,
    pub restaurants: Vec<Restaurant>,
}

/// POST /v1/restaurants - create a new restaurant account
async fn create_restaurant(
    State(state): State<AppState>,
    Json(payload): Json<RestaurantCreateRequest>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    let restaurant = restaurant_service(&state)
        .create_restaurant(payload.name, payload.address, payload.phone, payload.email)
        .await?;

    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// GET /v1/restaurants/:restaurant_id - show a restaurant
async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<Restaurant>, ApiError> {
    let restaurant = restaurant_service(&state)
        .get_restaurant_by_id(restaurant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found"))?;

    Ok(Json(restaurant))
}

/// GET /v1/restaurants - list all restaurants (Staff or Admin)
async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<RestaurantListResponse>, ApiError> {
    let restaurants = restaurant_service(&state).get_all_restaurants().await?;
    Ok(Json(RestaurantListResponse { total: restaurants.len(), restaurants }))
}

/// PUT /v1/restaurants/:restaurant_id - update a restaurant's profile
async fn update_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<RestaurantUpdateRequest>,
) -> Result<Json<Restaurant>, ApiError> {
    let changes = RestaurantChanges {
        name: payload.name,
        address: payload.address,
        phone: payload.phone,
        email: payload.email,
    };

    let restaurant = restaurant_service(&state)
        .update_restaurant(restaurant_id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found"))?;

    Ok(Json(restaurant))
}

/// PATCH /v1/restaurants/:restaurant_id/status - move the account through
/// the sales pipeline
async fn update_restaurant_status(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Restaurant>, ApiError> {
    let restaurant = restaurant_service(&state)
        .update_restaurant_status(restaurant_id, query.status)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found"))?;

    Ok(Json(restaurant))
}

/// DELETE /v1/restaurants/:restaurant_id - remove a restaurant
async fn delete_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = restaurant_service(&state).delete_restaurant(restaurant_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Restaurant not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
