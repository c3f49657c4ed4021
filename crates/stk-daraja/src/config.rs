//! # Daraja Configuration
//!
//! Configuration management for the Safaricom Daraja integration.
//! All secrets are loaded from environment variables once at startup and
//! passed into the client by value; component logic never reads ambient
//! global state.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use stk_core::PaymentError;
use std::env;

/// Sandbox API host; production overrides via `DARAJA_API_BASE_URL`
pub const DEFAULT_API_BASE_URL: &str = "https://sandbox.safaricom.co.ke";

/// Daraja API configuration
#[derive(Debug, Clone)]
pub struct DarajaConfig {
    /// OAuth consumer key
    pub consumer_key: String,

    /// OAuth consumer secret
    pub consumer_secret: String,

    /// Business short code (paybill/till number)
    pub short_code: String,

    /// Lipa Na M-Pesa passkey, combined with the short code and timestamp
    /// into the request-signing digest
    pub passkey: String,

    /// Publicly reachable URL the provider posts the payment result to
    pub callback_url: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl DarajaConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `DARAJA_CONSUMER_KEY`
    /// - `DARAJA_CONSUMER_SECRET`
    /// - `DARAJA_SHORTCODE`
    /// - `DARAJA_PASSKEY`
    /// - `DARAJA_CALLBACK_URL`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let consumer_key = require_env("DARAJA_CONSUMER_KEY")?;
        let consumer_secret = require_env("DARAJA_CONSUMER_SECRET")?;
        let short_code = require_env("DARAJA_SHORTCODE")?;
        let passkey = require_env("DARAJA_PASSKEY")?;
        let callback_url = require_env("DARAJA_CALLBACK_URL")?;

        let api_base_url = env::var("DARAJA_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            consumer_key,
            consumer_secret,
            short_code,
            passkey,
            callback_url,
            api_base_url,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        short_code: impl Into<String>,
        passkey: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            short_code: short_code.into(),
            passkey: passkey.into(),
            callback_url: callback_url.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Check that the OAuth credentials are present before any network call
    pub fn validate_credentials(&self) -> Result<(), PaymentError> {
        if self.consumer_key.is_empty() || self.consumer_secret.is_empty() {
            return Err(PaymentError::Configuration(
                "Missing consumer key or secret".to_string(),
            ));
        }
        Ok(())
    }

    /// `Authorization: Basic` value for the OAuth token endpoint:
    /// base64(consumer_key ":" consumer_secret)
    pub fn basic_auth(&self) -> String {
        BASE64.encode(format!("{}:{}", self.consumer_key, self.consumer_secret))
    }

    /// Request-signing digest: base64(short_code + passkey + timestamp).
    /// The provider validates this byte-for-byte; exact field order, no
    /// separators.
    pub fn password(&self, timestamp: &str) -> String {
        BASE64.encode(format!("{}{}{}", self.short_code, self.passkey, timestamp))
    }

    /// OAuth token endpoint URL
    pub fn token_url(&self) -> String {
        format!(
            "{}/oauth/v1/generate?grant_type=client_credentials",
            self.api_base_url
        )
    }

    /// STK push endpoint URL
    pub fn stkpush_url(&self) -> String {
        format!("{}/mpesa/stkpush/v1/processrequest", self.api_base_url)
    }

    /// Check if pointed at the sandbox host
    pub fn is_sandbox(&self) -> bool {
        self.api_base_url == DEFAULT_API_BASE_URL
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

fn require_env(name: &str) -> Result<String, PaymentError> {
    env::var(name).map_err(|_| PaymentError::Configuration(format!("{} not set", name)))
}

/// Format a timestamp the way the provider expects: 14 ASCII digits,
/// `YYYYMMDDHHMMSS`, seconds precision.
pub fn lipa_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}
