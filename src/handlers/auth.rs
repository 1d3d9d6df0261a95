use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::TokenResponse;
use crate::error::ApiError;
use crate::models::UserRole;
use crate::services::auth::{AuthService, NewUser};
use crate::state::AppState;

use super::users::UserResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.auth.clone(), state.scope.clone())
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /v1/auth/login - authenticate with form credentials and receive a
/// bearer token
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = auth_service(&state).login(&form.username, &form.password).await?;
    Ok(Json(token))
}

fn default_role() -> UserRole {
    UserRole::Staff
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub restaurant_id: Uuid,
    pub password: String,
}

/// POST /v1/auth/register - create a contact; only the password hash is
/// stored and the response never carries it
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_registration(&payload)?;

    let user = auth_service(&state)
        .register(NewUser {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            role: payload.role,
            restaurant_id: payload.restaurant_id,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

fn validate_registration(payload: &RegisterRequest) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if payload.name.trim().is_empty() {
        field_errors.insert("name".to_string(), "Name must not be empty".to_string());
    }
    if !payload.email.contains('@') {
        field_errors.insert("email".to_string(), "Invalid email address".to_string());
    }
    if payload.password.len() < 4 {
        field_errors.insert(
            "password".to_string(),
            "Password must be at least 4 characters".to_string(),
        );
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid registration input", Some(field_errors)))
    }
}
