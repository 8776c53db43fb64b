//! Route definitions for the WeightShare HTTP API.
//!
//! JSON endpoints are mounted under `/api`; the human-facing share route sits
//! at the root so links stay short.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request-scoped middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.share.max_body_bytes;

    let api_routes = Router::new()
        .merge(share_routes(&state))
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Share create and read. Only creation is rate limited.
fn share_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/shares",
            post(handlers::share::create_share).layer(axum_middleware::from_fn_with_state(
                state.clone(),
                middleware::rate_limit::rate_limit,
            )),
        )
        .route("/shares/{share_id}", get(handlers::share::get_share))
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Links handed out to people, outside `/api`
fn public_routes() -> Router<AppState> {
    Router::new().route("/share/{share_id}", get(handlers::share::redirect_share))
}
