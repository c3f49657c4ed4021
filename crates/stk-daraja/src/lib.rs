//! # stk-daraja
//!
//! Safaricom Daraja (M-Pesa) push strategy for stk-gateway.
//!
//! This crate covers the three provider-facing steps:
//!
//! 1. **Token exchange** - client-credentials call that trades the consumer
//!    key/secret for a short-lived bearer token
//! 2. **STK push** - signed Lipa Na M-Pesa Online request that makes the
//!    payer's handset prompt for a PIN
//! 3. **Callback parsing** - the asynchronous result the provider POSTs
//!    back once the payer responds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stk_daraja::DarajaClient;
//! use stk_core::{PushRequest, StkPushService};
//!
//! // Create client from environment
//! let client = DarajaClient::from_env()?;
//!
//! // Initiate a push; the ack means "accepted", not "paid"
//! let request = PushRequest::new("0712345678", 100, "user-42")?;
//! let ack = client.initiate_push(&request).await?;
//! ```
//!
//! ## Callback Handling
//!
//! ```rust,ignore
//! use stk_daraja::{parse_callback, dispatch_callback, LoggingCallbackHandler};
//!
//! // In your callback endpoint -- always answer 200 "OK" afterwards:
//! let outcome = parse_callback(&body);
//! dispatch_callback(&LoggingCallbackHandler, outcome)?;
//! ```

pub mod callback;
pub mod client;
pub mod config;

// Re-exports
pub use callback::{
    dispatch_callback, parse_callback, CallbackHandler, LoggingCallbackHandler,
};
pub use client::{DarajaClient, TRANSACTION_TYPE};
pub use config::{lipa_timestamp, DarajaConfig, DEFAULT_API_BASE_URL};
