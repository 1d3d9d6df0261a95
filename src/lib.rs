pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;
pub mod state;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Assemble the full application router.
///
/// Every request passes the authentication middleware first (public paths
/// excepted); per-route authorization gates and handlers run after it.
pub fn app(state: AppState) -> Router {
    let v1 = Router::new()
        .merge(handlers::auth::routes())
        .merge(handlers::users::routes(&state))
        .merge(handlers::restaurants::routes(&state))
        .merge(handlers::interactions::routes())
        .merge(handlers::orders::routes())
        .merge(handlers::call_plans::routes())
        .merge(handlers::performance::routes());

    Router::new()
        .route("/health", get(health))
        .nest("/v1", v1)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
