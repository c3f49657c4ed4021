//! # Push Request & Acknowledgment
//!
//! Request-scoped values for a single STK push attempt. Nothing here is
//! persisted; a `PushRequest` lives for one request/response cycle.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Kenyan country prefix expected by the provider
pub const COUNTRY_PREFIX: &str = "254";

/// A validated, normalized push-payment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    /// Payer phone number, normalized to the 254-prefixed 12-digit form
    pub msisdn: String,
    /// Amount in whole currency units (KES)
    pub amount: u64,
    /// Caller-side account/user identifier, embedded in the transaction
    /// reference strings
    pub account_id: String,
}

impl PushRequest {
    /// Validate raw request fields and build a normalized request.
    ///
    /// All three fields are required; a missing or empty field is a
    /// validation failure, not a crash, and no network call is made.
    pub fn new(
        phone: impl Into<String>,
        amount: u64,
        account_id: impl Into<String>,
    ) -> PaymentResult<Self> {
        let phone = phone.into();
        let account_id = account_id.into();

        if phone.trim().is_empty() {
            return Err(PaymentError::Validation("phone is required".to_string()));
        }
        if amount == 0 {
            return Err(PaymentError::Validation(
                "amount must be a positive integer".to_string(),
            ));
        }
        if account_id.trim().is_empty() {
            return Err(PaymentError::Validation("userId is required".to_string()));
        }

        Ok(Self {
            msisdn: normalize_msisdn(&phone),
            amount,
            account_id,
        })
    }

    /// Coerce a JSON `amount` field (number or numeric string) into a
    /// positive integer.
    pub fn coerce_amount(value: &serde_json::Value) -> PaymentResult<u64> {
        let amount = match value {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        match amount {
            Some(a) if a > 0 => Ok(a),
            _ => Err(PaymentError::Validation(
                "amount must be a positive integer".to_string(),
            )),
        }
    }
}

/// Normalize a phone number to the provider's 254-prefixed form.
///
/// Numbers already carrying the `254` prefix pass through unchanged;
/// otherwise the last 9 characters are kept and the prefix prepended.
/// This is a lossy heuristic: inputs shorter than 9 characters (or with
/// embedded `+`/spaces) produce malformed output. Known limitation,
/// preserved as-is.
pub fn normalize_msisdn(phone: &str) -> String {
    if phone.starts_with(COUNTRY_PREFIX) {
        return phone.to_string();
    }
    let skip = phone.chars().count().saturating_sub(9);
    let tail: String = phone.chars().skip(skip).collect();
    format!("{}{}", COUNTRY_PREFIX, tail)
}

/// Provider acknowledgment for an accepted push request.
///
/// Acceptance is NOT payment success; the final outcome arrives later on
/// the callback endpoint. Unknown fields are kept in `extra` so the body
/// round-trips verbatim to the API caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushAck {
    #[serde(rename = "MerchantRequestID", skip_serializing_if = "Option::is_none")]
    pub merchant_request_id: Option<String>,

    #[serde(rename = "CheckoutRequestID", skip_serializing_if = "Option::is_none")]
    pub checkout_request_id: Option<String>,

    #[serde(rename = "ResponseCode", skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,

    #[serde(
        rename = "ResponseDescription",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_description: Option<String>,

    #[serde(rename = "CustomerMessage", skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_local_format() {
        assert_eq!(normalize_msisdn("0712345678"), "254712345678");
    }

    #[test]
    fn test_normalize_already_prefixed() {
        assert_eq!(normalize_msisdn("254712345678"), "254712345678");
    }

    #[test]
    fn test_normalize_nine_digits() {
        assert_eq!(normalize_msisdn("712345678"), "254712345678");
    }

    #[test]
    fn test_normalize_short_input_is_lossy() {
        // Known limitation: short inputs yield malformed msisdns
        assert_eq!(normalize_msisdn("12345"), "25412345");
    }

    #[test]
    fn test_request_validation() {
        let req = PushRequest::new("0712345678", 100, "user-42").unwrap();
        assert_eq!(req.msisdn, "254712345678");
        assert_eq!(req.amount, 100);
        assert_eq!(req.account_id, "user-42");

        assert!(PushRequest::new("", 100, "user-42").is_err());
        assert!(PushRequest::new("0712345678", 0, "user-42").is_err());
        assert!(PushRequest::new("0712345678", 100, "").is_err());
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(PushRequest::coerce_amount(&json!(100)).unwrap(), 100);
        assert_eq!(PushRequest::coerce_amount(&json!("250")).unwrap(), 250);
        assert!(PushRequest::coerce_amount(&json!(0)).is_err());
        assert!(PushRequest::coerce_amount(&json!(-5)).is_err());
        assert!(PushRequest::coerce_amount(&json!("ten")).is_err());
        assert!(PushRequest::coerce_amount(&json!(null)).is_err());
    }

    #[test]
    fn test_ack_round_trips_unknown_fields() {
        let body = json!({
            "MerchantRequestID": "29115-34620561-1",
            "CheckoutRequestID": "ws_CO_191220191020363925",
            "ResponseCode": "0",
            "ResponseDescription": "Success. Request accepted for processing",
            "CustomerMessage": "Success. Request accepted for processing",
            "VendorExtension": "opaque"
        });

        let ack: PushAck = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(ack.response_code.as_deref(), Some("0"));
        assert_eq!(
            serde_json::to_value(&ack).unwrap()["VendorExtension"],
            "opaque"
        );
    }
}
