//! # Payment Error Types
//!
//! Typed error handling for the stk-gateway payment engine.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing secrets, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (missing/malformed fields)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// OAuth token exchange with the provider failed
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),

    /// The push-payment request was rejected or could not be delivered
    #[error("Payment initiation failed: {0}")]
    PaymentInitiation(String),

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Callback payload could not be parsed
    #[error("Callback parse error: {0}")]
    CallbackParse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::Validation(_) => 400,
            PaymentError::TokenAcquisition(_) => 500,
            PaymentError::PaymentInitiation(_) => 500,
            PaymentError::Network(_) => 500,
            PaymentError::CallbackParse(_) => 500,
            PaymentError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PaymentError::Validation("missing phone".into()).status_code(),
            400
        );
        assert_eq!(
            PaymentError::TokenAcquisition("401".into()).status_code(),
            500
        );
        assert_eq!(
            PaymentError::PaymentInitiation("rejected".into()).status_code(),
            500
        );
        assert_eq!(
            PaymentError::Configuration("no key".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_display_messages() {
        let err = PaymentError::TokenAcquisition("Invalid credentials".into());
        assert_eq!(
            err.to_string(),
            "Token acquisition failed: Invalid credentials"
        );

        let err = PaymentError::Validation("amount must be positive".into());
        assert_eq!(err.to_string(), "Invalid request: amount must be positive");
    }
}
