//! # Routes
//!
//! Axum router configuration for the stk-gateway API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /            - Liveness check
/// - POST /api/topup   - Initiate an STK push top-up
/// - POST /callback    - Provider callback receiver (always 200 "OK")
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health))
        .route("/api/topup", post(handlers::topup))
        // Callback must accept the raw body; parse failures still answer 200
        .route("/callback", post(handlers::callback))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
