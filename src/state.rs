use std::sync::Arc;

use regex::RegexSet;
use sqlx::PgPool;

use crate::auth::{AuthController, DatabaseAuthenticator, JwtTokenStrategy};
use crate::config::AppConfig;
use crate::db::PgScope;

/// Application context built once at startup and injected into handlers
/// and middleware via axum state. There is no ambient global - everything
/// a component needs travels through here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub scope: PgScope,
    pub auth: Arc<AuthController>,
    pub public_paths: Arc<RegexSet>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> anyhow::Result<Self> {
        let authenticator = Arc::new(DatabaseAuthenticator::new(pool.clone()));
        let token_strategy = Arc::new(JwtTokenStrategy::from_config(&config.security)?);
        let auth = Arc::new(AuthController::new(authenticator, token_strategy));

        let public_paths = Arc::new(RegexSet::new(&config.security.public_paths)?);
        let scope = PgScope::from_pool(pool.clone());

        Ok(Self {
            config: Arc::new(config),
            pool,
            scope,
            auth,
            public_paths,
        })
    }
}
