use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Order, OrderStatus};
use crate::services::OrderService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(place_order))
        .route("/orders/restaurants/:restaurant_id", get(list_restaurant_orders))
        .route("/orders/:order_id/status", patch(update_order_status))
}

fn order_service(state: &AppState) -> OrderService {
    OrderService::new(state.scope.clone())
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusQuery {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub total: usize,
    pub orders: Vec<Order>,
}

/// POST /v1/orders - place an order; the backing interaction and the order
/// are written atomically
async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    if payload.amount <= 0 {
        return Err(ApiError::bad_request("Order amount must be positive"));
    }

    let order = order_service(&state)
        .place_order(payload.restaurant_id, payload.user_id, payload.amount, payload.notes)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /v1/orders/restaurants/:restaurant_id - orders for one restaurant
async fn list_restaurant_orders(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<OrderListResponse>, ApiError> {
    let orders = order_service(&state).get_restaurant_orders(restaurant_id).await?;
    Ok(Json(OrderListResponse { total: orders.len(), orders }))
}

/// PATCH /v1/orders/:order_id/status - advance an order through its
/// lifecycle
async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Query(query): Query<OrderStatusQuery>,
) -> Result<Json<Order>, ApiError> {
    let order = order_service(&state).update_order_status(order_id, query.status).await?;
    Ok(Json(order))
}
