//! # Push Service Trait
//!
//! Seam between the HTTP layer and the provider client. The API layer holds
//! a `BoxedStkPushService` so handlers can be exercised against a test
//! double without touching the network.

use crate::error::PaymentResult;
use crate::push::{PushAck, PushRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// A service that can initiate an STK push against a payment provider.
///
/// Each call is a single, independent attempt: no retries, no idempotency
/// key, no caching of the provider token between calls.
#[async_trait]
pub trait StkPushService: Send + Sync {
    /// Initiate a push payment and return the provider's acknowledgment.
    ///
    /// The acknowledgment means the push was accepted for processing, not
    /// that the payment succeeded; the final outcome arrives on the
    /// callback endpoint.
    async fn initiate_push(&self, request: &PushRequest) -> PaymentResult<PushAck>;

    /// Provider name, for logging
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared, dynamically dispatched push service
pub type BoxedStkPushService = Arc<dyn StkPushService>;
