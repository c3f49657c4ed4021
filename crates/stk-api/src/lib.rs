//! # stk-api
//!
//! HTTP API layer for stk-gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Top-up endpoint that initiates an STK push
//! - Callback receiver for the provider's asynchronous payment result
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Liveness check |
//! | POST | `/api/topup` | Initiate an STK push top-up |
//! | POST | `/callback` | Provider payment-result callback |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
