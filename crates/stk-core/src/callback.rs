//! # Callback Outcome Model
//!
//! The provider reports the final result of a push asynchronously. A parsed
//! callback is one of three explicit variants: a completed payment with its
//! metadata, a failure with the provider's description, or an absent/
//! malformed body. Field-presence guessing at access sites is not allowed;
//! parsing happens once, up front.

use std::collections::HashMap;

/// Result of parsing a provider callback body.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    /// `ResultCode == 0`: the payer authorized the payment
    Completed(PaymentConfirmation),
    /// Non-zero `ResultCode`: the push was cancelled, timed out, or failed
    Failed {
        result_code: i64,
        result_desc: String,
    },
    /// The `Body.stkCallback` path was missing or the body was malformed
    Absent,
}

impl CallbackOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CallbackOutcome::Completed(_))
    }
}

/// Metadata for a completed payment, folded from the provider's
/// `{Name, Value}` item list. Duplicate names are last-write-wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentConfirmation {
    pub result_desc: String,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl PaymentConfirmation {
    /// Fold `{Name, Value}` pairs into a name-keyed map, last write wins.
    pub fn from_items<I>(result_desc: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        let mut metadata = HashMap::new();
        for (name, value) in items {
            metadata.insert(name, value);
        }
        Self {
            result_desc: result_desc.into(),
            metadata,
        }
    }

    /// Amount paid, if the provider included it
    pub fn amount(&self) -> Option<i64> {
        self.metadata.get("Amount").and_then(|v| v.as_i64())
    }

    /// Payer phone number; the provider sends it as a number, older
    /// payloads as a string
    pub fn phone_number(&self) -> Option<String> {
        self.metadata.get("PhoneNumber").map(display_value)
    }

    /// Provider receipt number for the completed transaction
    pub fn receipt_number(&self) -> Option<String> {
        self.metadata.get("MpesaReceiptNumber").map(display_value)
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
