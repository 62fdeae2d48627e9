use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use relay::{FailureReason, OrderRequestError, ProcessorError};

/// Failures of the create-order endpoint.
#[derive(Debug, thiserror::Error)]
pub enum InitiatorError {
    /// Credentials are not configured
    #[error("configuration error: PAYPAL_CLIENT_ID or PAYPAL_CLIENT_SECRET is missing")]
    Configuration,
    /// Missing or malformed query parameters
    #[error(transparent)]
    Validation(#[from] OrderRequestError),
    /// The processor call failed
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

impl InitiatorError {
    pub fn reason(&self) -> FailureReason {
        match self {
            InitiatorError::Configuration => FailureReason::ConfigError,
            InitiatorError::Validation(_) => FailureReason::InvalidRequest,
            InitiatorError::Processor(e) => e.failure_reason(),
        }
    }

    /// Machine-readable `error` field of the JSON body.
    pub fn code(&self) -> &'static str {
        match self {
            InitiatorError::Configuration => "configuration_error",
            InitiatorError::Validation(_) => "invalid_request",
            InitiatorError::Processor(e) => match e {
                ProcessorError::Auth { .. } => "upstream_auth_failed",
                ProcessorError::Api { .. } => "upstream_error",
                ProcessorError::MissingApprovalLink { .. } | ProcessorError::MissingOrderId => {
                    "missing_approval_link"
                }
                ProcessorError::Network(_) => "network_error",
                ProcessorError::Protocol(_) => "protocol_error",
            },
        }
    }
}

impl ResponseError for InitiatorError {
    fn status_code(&self) -> StatusCode {
        match self {
            InitiatorError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            InitiatorError::Validation(_) => StatusCode::BAD_REQUEST,
            InitiatorError::Processor(e) => match e {
                // Pass the processor's own verdict through.
                ProcessorError::Api { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                ProcessorError::Auth { .. }
                | ProcessorError::Network(_)
                | ProcessorError::Protocol(_) => StatusCode::BAD_GATEWAY,
                ProcessorError::MissingApprovalLink { .. } | ProcessorError::MissingOrderId => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        match self {
            InitiatorError::Processor(ProcessorError::Api {
                name,
                message,
                issue,
                ..
            }) => {
                body["message"] = serde_json::json!("Failed to create order.");
                body["details"] = serde_json::json!({
                    "name": name,
                    "message": message,
                    "issue": issue,
                });
            }
            InitiatorError::Processor(ProcessorError::Network(_)) => {
                body["message"] = serde_json::json!("Failed to reach the payment processor.");
            }
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
