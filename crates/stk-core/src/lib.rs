//! # stk-core
//!
//! Core types and traits for the stk-gateway payment engine.
//!
//! This crate provides:
//! - `PushRequest` validation and phone-number normalization
//! - `PushAck` for the provider's acknowledgment body
//! - `CallbackOutcome` for parsed asynchronous payment results
//! - `StkPushService` trait for provider implementations
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use stk_core::{PushRequest, StkPushService};
//!
//! // Validate and normalize an inbound top-up request
//! let request = PushRequest::new("0712345678", 100, "user-42")?;
//!
//! // Initiate the push via a provider service
//! let ack = service.initiate_push(&request).await?;
//!
//! // ack.customer_message is shown to the payer; the final result arrives
//! // later on the callback endpoint.
//! ```

pub mod callback;
pub mod error;
pub mod push;
pub mod service;

// Re-exports for convenience
pub use callback::{CallbackOutcome, PaymentConfirmation};
pub use error::{PaymentError, PaymentResult};
pub use push::{normalize_msisdn, PushAck, PushRequest, COUNTRY_PREFIX};
pub use service::{BoxedStkPushService, StkPushService};
