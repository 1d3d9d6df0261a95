use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{AuthController, TokenResponse};
use crate::db::PgScope;
use crate::error::ApiError;
use crate::models::{User, UserRole};
use crate::repository;

/// Profile data for a new contact; the password arrives as plaintext and
/// leaves this module only as a hash
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub restaurant_id: Uuid,
    pub password: String,
}

pub struct AuthService {
    controller: Arc<AuthController>,
    scope: PgScope,
}

impl AuthService {
    pub fn new(controller: Arc<AuthController>, scope: PgScope) -> Self {
        Self { controller, scope }
    }

    /// Authenticate and mint a bearer token. The failure message never
    /// reveals whether the username or the password was wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let user = self
            .controller
            .authenticate(username, password)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

        self.controller.create_token(&user)
    }

    /// Register a new contact, storing only the password hash
    pub async fn register(&self, new_user: NewUser) -> Result<User, ApiError> {
        let hashed = self.controller.hash_password(&new_user.password).await?;

        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::user::create(
                        tx,
                        &new_user.name,
                        &new_user.email,
                        &new_user.phone,
                        new_user.role,
                        new_user.restaurant_id,
                        &hashed,
                    )
                    .await
                })
            })
            .await
    }
}
