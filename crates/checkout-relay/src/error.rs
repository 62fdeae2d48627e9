use thiserror::Error;

use crate::reason::FailureReason;

/// Errors returned by processor operations.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The credential exchange was rejected.
    #[error("credential exchange rejected ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The processor answered a create/capture call with a non-success status.
    #[error("processor rejected request ({status} {name}): {message}")]
    Api {
        status: u16,
        name: String,
        message: String,
        /// First `details[].issue` code, e.g. `ORDER_ALREADY_CAPTURED`.
        issue: Option<String>,
    },

    /// Could not reach the processor, or the connection failed mid-response.
    #[error("network error: {0}")]
    Network(String),

    /// The order was created but no `approve` link came back.
    #[error("order {order_id} created, but missing payment approval link")]
    MissingApprovalLink { order_id: String },

    /// The create call succeeded but the response carries no order id.
    #[error("order created, but the response has no order id")]
    MissingOrderId,

    /// A response could not be read.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ProcessorError {
    /// HTTP status the processor answered with, when it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProcessorError::Auth { status, .. } | ProcessorError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Reason code reported to the frontend for this failure.
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            ProcessorError::Auth { .. } => FailureReason::AuthError,
            ProcessorError::Api { .. } => FailureReason::UpstreamError,
            ProcessorError::MissingApprovalLink { .. } | ProcessorError::MissingOrderId => {
                FailureReason::MissingApprovalLink
            }
            ProcessorError::Network(_) | ProcessorError::Protocol(_) => FailureReason::ServerError,
        }
    }
}

impl From<reqwest::Error> for ProcessorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProcessorError::Protocol(format!("unreadable response body: {e}"))
        } else {
            ProcessorError::Network(e.to_string())
        }
    }
}
