//! # Request Handlers
//!
//! Axum request handlers for the stk-gateway API: liveness, top-up
//! initiation, and the provider callback receiver.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use stk_core::{PaymentError, PushAck, PushRequest};
use stk_daraja::{dispatch_callback, parse_callback, LoggingCallbackHandler};
use tracing::{debug, error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Top-up request body: `{phone, amount, userId}`
///
/// Every field is optional at the serde level so absence becomes a 400
/// response instead of a rejected body. `amount` may arrive as a JSON
/// number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Top-up success response
#[derive(Debug, Serialize)]
pub struct TopUpResponse {
    pub message: String,
    pub mpesa_response: PushAck,
}

/// Error response: 400 carries `{message}`, 500 adds `{error}` with the
/// provider's or transport's reported message
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = if status == StatusCode::BAD_REQUEST {
        ErrorResponse::new(err.to_string())
    } else {
        ErrorResponse::new("Payment failed").with_error(err.to_string())
    };

    (status, Json(body))
}

// =============================================================================
// Handlers
// =============================================================================

/// Liveness endpoint
pub async fn health() -> impl IntoResponse {
    "STK gateway is alive."
}

/// Initiate an STK push top-up
///
/// Validates the request fields before any network I/O; a valid request
/// triggers exactly one token fetch followed by one push POST. The 200
/// response only means the provider accepted the push; the payer's
/// decision arrives later on `/callback`.
#[instrument(skip(state, request))]
pub async fn topup(
    State(state): State<AppState>,
    Json(request): Json<TopUpRequest>,
) -> Result<Json<TopUpResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (Some(phone), Some(amount), Some(user_id)) =
        (&request.phone, &request.amount, &request.user_id)
    else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Please provide phone, amount, and userId",
            )),
        ));
    };

    let push_request = PushRequest::coerce_amount(amount)
        .and_then(|amount| PushRequest::new(phone.clone(), amount, user_id.clone()))
        .map_err(payment_error_to_response)?;

    info!(
        "Top-up request: {} for KES {} by {}",
        push_request.msisdn, push_request.amount, push_request.account_id
    );

    let ack = state
        .service
        .initiate_push(&push_request)
        .await
        .map_err(|e| {
            error!("Payment error: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(TopUpResponse {
        message: "STK push sent to your phone. Enter your PIN.".to_string(),
        mpesa_response: ack,
    }))
}

/// Receive the provider's asynchronous payment result
///
/// ALWAYS answers 200 "OK", even for malformed bodies: anything else makes
/// the provider retry delivery indefinitely. Internal processing failures
/// are logged, never surfaced.
#[instrument(skip(body))]
pub async fn callback(body: Bytes) -> impl IntoResponse {
    debug!("Callback received: {} bytes", body.len());

    let outcome = parse_callback(&body);

    if let Err(e) = dispatch_callback(&LoggingCallbackHandler, outcome) {
        error!("Callback processing error: {}", e);
    }

    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppState;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use stk_core::{PaymentResult, StkPushService};

    enum StubOutcome {
        Accept,
        RejectToken,
    }

    struct StubService {
        calls: AtomicUsize,
        outcome: StubOutcome,
    }

    impl StubService {
        fn accepting() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome: StubOutcome::Accept,
            })
        }

        fn token_rejecting() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome: StubOutcome::RejectToken,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StkPushService for StubService {
        async fn initiate_push(&self, _request: &PushRequest) -> PaymentResult<PushAck> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                StubOutcome::Accept => Ok(serde_json::from_value(json!({
                    "MerchantRequestID": "29115-34620561-1",
                    "CheckoutRequestID": "ws_CO_191220191020363925",
                    "ResponseCode": "0",
                    "ResponseDescription": "Success. Request accepted for processing",
                    "CustomerMessage": "Success. Request accepted for processing"
                }))
                .unwrap()),
                StubOutcome::RejectToken => Err(PaymentError::TokenAcquisition(
                    "Invalid Access Token".to_string(),
                )),
            }
        }

        fn provider_name(&self) -> &'static str {
            "stub"
        }
    }

    fn test_server(service: Arc<StubService>) -> TestServer {
        let state = AppState::with_service(service);
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(StubService::accepting());
        let response = server.get("/").await;

        response.assert_status_ok();
        assert!(response.text().contains("alive"));
    }

    #[tokio::test]
    async fn test_topup_success() {
        let service = StubService::accepting();
        let server = test_server(service.clone());

        let response = server
            .post("/api/topup")
            .json(&json!({ "phone": "0712345678", "amount": 100, "userId": "user-42" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["message"],
            "STK push sent to your phone. Enter your PIN."
        );
        assert_eq!(body["mpesa_response"]["ResponseCode"], "0");
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_topup_accepts_string_amount() {
        let server = test_server(StubService::accepting());

        let response = server
            .post("/api/topup")
            .json(&json!({ "phone": "0712345678", "amount": "100", "userId": "user-42" }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_topup_missing_fields_is_400_with_no_push() {
        let service = StubService::accepting();
        let server = test_server(service.clone());

        for body in [
            json!({ "amount": 100, "userId": "u" }),
            json!({ "phone": "0712345678", "userId": "u" }),
            json!({ "phone": "0712345678", "amount": 100 }),
            json!({}),
        ] {
            let response = server.post("/api/topup").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: serde_json::Value = response.json();
            assert_eq!(body["message"], "Please provide phone, amount, and userId");
        }

        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_topup_invalid_amount_is_400_with_no_push() {
        let service = StubService::accepting();
        let server = test_server(service.clone());

        let response = server
            .post("/api/topup")
            .json(&json!({ "phone": "0712345678", "amount": "ten", "userId": "u" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_topup_provider_failure_is_500_with_message() {
        let server = test_server(StubService::token_rejecting());

        let response = server
            .post("/api/topup")
            .json(&json!({ "phone": "0712345678", "amount": 100, "userId": "u" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Payment failed");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Invalid Access Token"));
    }

    #[tokio::test]
    async fn test_callback_success_is_always_ok() {
        let server = test_server(StubService::accepting());

        let response = server
            .post("/callback")
            .json(&json!({
                "Body": {
                    "stkCallback": {
                        "ResultCode": 0,
                        "ResultDesc": "The service request is processed successfully.",
                        "CallbackMetadata": {
                            "Item": [
                                { "Name": "Amount", "Value": 100 },
                                { "Name": "MpesaReceiptNumber", "Value": "ABC123" },
                                { "Name": "PhoneNumber", "Value": "254712345678" }
                            ]
                        }
                    }
                }
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_callback_failure_is_still_ok() {
        let server = test_server(StubService::accepting());

        let response = server
            .post("/callback")
            .json(&json!({
                "Body": {
                    "stkCallback": {
                        "ResultCode": 1032,
                        "ResultDesc": "Request cancelled by user"
                    }
                }
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_callback_garbage_is_still_ok() {
        let server = test_server(StubService::accepting());

        let response = server.post("/callback").text("not json at all").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }
}
