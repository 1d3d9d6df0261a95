use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::password;
use crate::error::ApiError;
use crate::models::User;
use crate::repository;

/// Credential-verification capability. Implementations own the lookup of
/// identity records for their scheme; an unknown principal or a failed
/// check is `None`, never an error.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, ApiError>;

    /// Resolve the full principal record by its login identifier
    async fn get_user(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Hash a plaintext for storage; exposed for registration
    async fn hash_password(&self, password: &str) -> Result<String, ApiError>;
}

/// Username/password authentication against the user table
pub struct DatabaseAuthenticator {
    pool: PgPool,
}

impl DatabaseAuthenticator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Authenticator for DatabaseAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, ApiError> {
        let user = match self.get_user(username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        // Argon2 verification is CPU-bound; keep it off the async workers
        let plaintext = password.to_string();
        let hashed = user.hashed_password.clone();
        let matches = tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &hashed))
            .await
            .map_err(|e| {
                tracing::error!("Password verification task failed: {}", e);
                ApiError::internal_server_error("Failed to process credentials")
            })??;

        if !matches {
            tracing::debug!("Password mismatch for {}", username);
            return Ok(None);
        }

        Ok(Some(user))
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, ApiError> {
        let mut conn = self.pool.acquire().await?;
        repository::user::get_by_email(&mut conn, username).await
    }

    async fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        let plaintext = password.to_string();
        tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
            .await
            .map_err(|e| {
                tracing::error!("Password hashing task failed: {}", e);
                ApiError::internal_server_error("Failed to process credentials")
            })?
    }
}
