use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{middleware, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthorizationFilter, RoleFilter};
use crate::error::ApiError;
use crate::models::{User, UserRole};
use crate::repository::user::UserChanges;
use crate::services::UserService;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let admin_or_manager: Arc<dyn AuthorizationFilter> =
        Arc::new(RoleFilter::any_of(vec![UserRole::Admin, UserRole::Manager]));

    Router::new()
        .route("/user", get(list_contacts))
        .route("/user/:user_id", get(get_contact).put(update_contact))
        .route("/user/restaurants/:restaurant_id/pocs", get(list_contacts_by_restaurant))
        .merge(
            // Removing contacts is reserved for management roles
            Router::new()
                .route("/user/:user_id", delete(delete_contact))
                .route_layer(middleware::from_fn(state.auth.requires(admin_or_manager))),
        )
}

fn user_service(state: &AppState) -> UserService {
    UserService::new(state.scope.clone())
}

/// Public profile of a contact - everything except the credential hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub restaurant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            restaurant_id: user.restaurant_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub total: usize,
    pub users: Vec<UserResponse>,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
        Self { total: users.len(), users }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
}

/// GET /v1/user/:user_id - show a single contact
async fn get_contact(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user_service(&state)
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    Ok(Json(user.into()))
}

/// GET /v1/user - list all contacts
async fn list_contacts(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users = user_service(&state).get_all_users().await?;
    Ok(Json(users.into()))
}

/// GET /v1/user/restaurants/:restaurant_id/pocs - contacts attached to a
/// restaurant
async fn list_contacts_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = user_service(&state).get_users_by_restaurant(restaurant_id).await?;
    Ok(Json(users.into()))
}

/// PUT /v1/user/:user_id - update a contact's profile
async fn update_contact(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UserUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let changes = UserChanges {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        role: payload.role,
    };

    let user = user_service(&state)
        .update_user(user_id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    Ok(Json(user.into()))
}

/// DELETE /v1/user/:user_id - remove a contact (Admin or Manager only)
async fn delete_contact(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = user_service(&state).delete_user(user_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Contact not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
