//! # STK Gateway
//!
//! Minimal M-Pesa push-payment gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export DARAJA_CONSUMER_KEY=...
//! export DARAJA_CONSUMER_SECRET=...
//! export DARAJA_SHORTCODE=174379
//! export DARAJA_PASSKEY=...
//! export DARAJA_CALLBACK_URL=https://example.com/callback
//!
//! # Run the server
//! stk-gateway
//! ```

use stk_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.service.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("STK gateway starting on http://{}", addr);

    if !is_prod {
        info!("Liveness: GET http://{}/", addr);
        info!("Top-up: POST http://{}/api/topup", addr);
        info!("Callback: POST http://{}/callback", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
