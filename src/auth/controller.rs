use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use futures::future::BoxFuture;
use serde::Serialize;

use crate::auth::authenticator::Authenticator;
use crate::auth::filter::AuthorizationFilter;
use crate::auth::token::TokenStrategy;
use crate::error::ApiError;
use crate::models::User;

/// The authenticated principal attached to a request after token
/// verification
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Bearer-token envelope returned by the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Orchestrates credential verification, token issuance/verification and
/// per-route authorization gates. Built once at startup from the injected
/// authenticator and token strategy.
pub struct AuthController {
    authenticator: Arc<dyn Authenticator>,
    token_strategy: Arc<dyn TokenStrategy>,
}

impl AuthController {
    pub fn new(authenticator: Arc<dyn Authenticator>, token_strategy: Arc<dyn TokenStrategy>) -> Self {
        Self { authenticator, token_strategy }
    }

    /// Authenticate user with provided credentials
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, ApiError> {
        self.authenticator.authenticate(username, password).await
    }

    /// Hash a plaintext password for storage
    pub async fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        self.authenticator.hash_password(password).await
    }

    /// Verify a bearer token and re-resolve the full principal record from
    /// its identifying claim, so authorization always sees current role
    /// data rather than whatever was true at token issuance.
    pub async fn verify_token(&self, token: &str) -> Result<User, ApiError> {
        let claims = self.token_strategy.verify_token(token)?;

        self.authenticator
            .get_user(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid token or expired token"))
    }

    /// Create authentication token
    pub fn create_token(&self, user: &User) -> Result<TokenResponse, ApiError> {
        let access_token = self.token_strategy.create_token(user)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Build a per-route gate for `filter`, usable with
    /// `axum::middleware::from_fn`.
    ///
    /// The gate re-fetches the principal by the login identifier attached
    /// during token verification instead of trusting the cached copy, so a
    /// role change takes effect on the next request. A missing or stale
    /// principal is a 401; a filter that evaluates to false is a 403.
    pub fn requires(
        &self,
        filter: Arc<dyn AuthorizationFilter>,
    ) -> impl Fn(Request, Next) -> BoxFuture<'static, Result<Response, ApiError>> + Clone + Send + 'static
    {
        let authenticator = self.authenticator.clone();

        move |request: Request, next: Next| -> BoxFuture<'static, Result<Response, ApiError>> {
            let authenticator = authenticator.clone();
            let filter = filter.clone();

            Box::pin(async move {
                let attached = request
                    .extensions()
                    .get::<CurrentUser>()
                    .cloned()
                    .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

                let user = authenticator
                    .get_user(&attached.0.email)
                    .await?
                    .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

                if !filter.authorize(&user, &request).await? {
                    return Err(ApiError::forbidden("Not enough permissions"));
                }

                Ok(next.run(request).await)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::auth::token::JwtTokenStrategy;
    use crate::models::UserRole;

    /// In-memory authenticator; stands in for the database-backed one
    struct StaticAuthenticator {
        user: User,
        password: String,
    }

    #[async_trait]
    impl Authenticator for StaticAuthenticator {
        async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, ApiError> {
            if username == self.user.email && password == self.password {
                Ok(Some(self.user.clone()))
            } else {
                Ok(None)
            }
        }

        async fn get_user(&self, username: &str) -> Result<Option<User>, ApiError> {
            if username == self.user.email {
                Ok(Some(self.user.clone()))
            } else {
                Ok(None)
            }
        }

        async fn hash_password(&self, password: &str) -> Result<String, ApiError> {
            Ok(format!("hashed:{}", password))
        }
    }

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            user_id: Uuid::new_v4(),
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "5550100200".to_string(),
            role: UserRole::Staff,
            hashed_password: "irrelevant".to_string(),
            restaurant_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn controller(user: User) -> AuthController {
        AuthController::new(
            Arc::new(StaticAuthenticator { user, password: "correct".to_string() }),
            Arc::new(JwtTokenStrategy::new("test-secret", 24).unwrap()),
        )
    }

    #[tokio::test]
    async fn authenticate_delegates_to_authenticator() {
        let controller = controller(sample_user());

        let found = controller.authenticate("asha@example.com", "correct").await.unwrap();
        assert!(found.is_some());

        let missing = controller.authenticate("asha@example.com", "wrong").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn verify_token_resolves_full_principal() {
        let user = sample_user();
        let controller = controller(user.clone());

        let token = controller.create_token(&user).unwrap();
        assert_eq!(token.token_type, "bearer");

        let resolved = controller.verify_token(&token.access_token).await.unwrap();
        assert_eq!(resolved.user_id, user.user_id);
        assert_eq!(resolved.email, user.email);
    }

    #[tokio::test]
    async fn verify_token_rejects_unknown_subject() {
        let controller = controller(sample_user());

        // Token signed with the right secret but for a principal that no
        // longer exists
        let stranger = User {
            email: "gone@example.com".to_string(),
            ..sample_user()
        };
        let token = controller.create_token(&stranger).unwrap();

        let err = controller.verify_token(&token.access_token).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
