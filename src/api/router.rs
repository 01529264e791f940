use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::tokens;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    let token_routes: Router<AppState> =
        Router::new().route("/tokens", post(tokens::create_token).get(tokens::list_tokens));

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Token endpoints, also reachable under the /api prefix that
        // existing clients use
        .merge(token_routes.clone())
        .nest("/api", token_routes)
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
