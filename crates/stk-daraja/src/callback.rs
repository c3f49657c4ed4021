//! # Daraja Callback Handling
//!
//! The provider reports the payer's final decision by POSTing a nested JSON
//! body to the configured callback URL. Parsing is tolerant: a missing
//! `Body.stkCallback` path or a malformed body yields `CallbackOutcome::
//! Absent` instead of an error, because the endpoint must acknowledge with
//! 200 regardless — anything else makes the provider retry delivery.

use serde::Deserialize;
use stk_core::{CallbackOutcome, PaymentConfirmation, PaymentResult};
use tracing::{debug, info, warn};

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct CallbackEnvelope {
    #[serde(rename = "Body", default)]
    body: Option<CallbackBody>,
}

#[derive(Debug, Deserialize)]
struct CallbackBody {
    #[serde(rename = "stkCallback", default)]
    stk_callback: Option<StkCallback>,
}

#[derive(Debug, Deserialize)]
struct StkCallback {
    #[serde(rename = "ResultCode")]
    result_code: i64,
    #[serde(rename = "ResultDesc", default)]
    result_desc: String,
    #[serde(rename = "CallbackMetadata", default)]
    callback_metadata: Option<CallbackMetadata>,
}

#[derive(Debug, Deserialize)]
struct CallbackMetadata {
    #[serde(rename = "Item", default)]
    item: Vec<MetadataItem>,
}

#[derive(Debug, Deserialize)]
struct MetadataItem {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value", default)]
    value: serde_json::Value,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a raw callback body into an explicit outcome.
///
/// `ResultCode == 0` with missing `CallbackMetadata` is treated as a
/// degraded success (empty metadata) rather than a parse failure: the
/// payment did complete, the provider just withheld the detail fields.
pub fn parse_callback(body: &[u8]) -> CallbackOutcome {
    let envelope: CallbackEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Unparseable callback body: {}", e);
            return CallbackOutcome::Absent;
        }
    };

    let Some(callback) = envelope.body.and_then(|b| b.stk_callback) else {
        debug!("Callback without Body.stkCallback payload");
        return CallbackOutcome::Absent;
    };

    if callback.result_code != 0 {
        return CallbackOutcome::Failed {
            result_code: callback.result_code,
            result_desc: callback.result_desc,
        };
    }

    if callback.callback_metadata.is_none() {
        warn!("Successful callback carried no CallbackMetadata");
    }

    let items = callback
        .callback_metadata
        .map(|m| m.item)
        .unwrap_or_default()
        .into_iter()
        .map(|item| (item.name, item.value));

    CallbackOutcome::Completed(PaymentConfirmation::from_items(
        callback.result_desc,
        items,
    ))
}

// =============================================================================
// Handler Dispatch
// =============================================================================

/// Callback event handler trait
///
/// Implement this to react to payment outcomes. Default method bodies log
/// and succeed, so an implementation only overrides what it needs.
#[allow(unused_variables)]
pub trait CallbackHandler: Send + Sync {
    /// Called when the payer authorized the payment
    fn on_payment_completed(&self, confirmation: PaymentConfirmation) -> PaymentResult<()> {
        info!(
            "Payment successful: KES {} from {}, receipt {}",
            confirmation
                .amount()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "?".to_string()),
            confirmation.phone_number().unwrap_or_else(|| "?".to_string()),
            confirmation
                .receipt_number()
                .unwrap_or_else(|| "?".to_string()),
        );
        Ok(())
    }

    /// Called when the push was cancelled, timed out, or rejected
    fn on_payment_failed(&self, result_code: i64, result_desc: &str) -> PaymentResult<()> {
        info!("Payment failed ({}): {}", result_code, result_desc);
        Ok(())
    }

    /// Called when the callback body carried no recognizable payload
    fn on_callback_absent(&self) -> PaymentResult<()> {
        warn!("Callback received without a usable stkCallback payload");
        Ok(())
    }
}

/// Default handler: logs every outcome, no other side effects
pub struct LoggingCallbackHandler;

impl CallbackHandler for LoggingCallbackHandler {}

/// Dispatch a parsed outcome to the appropriate handler method
pub fn dispatch_callback(
    handler: &dyn CallbackHandler,
    outcome: CallbackOutcome,
) -> PaymentResult<()> {
    match outcome {
        CallbackOutcome::Completed(confirmation) => handler.on_payment_completed(confirmation),
        CallbackOutcome::Failed {
            result_code,
            result_desc,
        } => handler.on_payment_failed(result_code, &result_desc),
        CallbackOutcome::Absent => handler.on_callback_absent(),
    }
}
