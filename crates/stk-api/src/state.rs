//! # Application State
//!
//! Shared state for the Axum application: the push service and the server
//! configuration, built once at startup and cloned into each handler.

use stk_core::BoxedStkPushService;
use stk_daraja::DarajaClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Push-payment service (Daraja in production, a stub in tests)
    pub service: BoxedStkPushService,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Daraja client
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let client = DarajaClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Daraja client: {}", e))?;

        Ok(Self {
            service: Arc::new(client),
            config,
        })
    }

    /// Create state with an explicit service (for tests)
    pub fn with_service(service: BoxedStkPushService) -> Self {
        Self {
            service,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }
}
