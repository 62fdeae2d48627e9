//! Reason codes carried on failure-page redirects (`?message=<reason>`).
//!
//! The frontend matches on these strings, so the set is closed and the
//! spellings are stable.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// Credentials are not configured.
    ConfigError,
    /// The processor redirect arrived without a `token`.
    MissingOrderID,
    /// `amount` or `description` missing or malformed.
    InvalidRequest,
    /// The processor rejected the credential exchange.
    AuthError,
    /// The processor rejected the order call.
    UpstreamError,
    /// Order created but no approval link came back.
    MissingApprovalLink,
    /// Transport failure or unreadable response.
    ServerError,
}

impl FailureReason {
    pub const ALL: [FailureReason; 7] = [
        FailureReason::ConfigError,
        FailureReason::MissingOrderID,
        FailureReason::InvalidRequest,
        FailureReason::AuthError,
        FailureReason::UpstreamError,
        FailureReason::MissingApprovalLink,
        FailureReason::ServerError,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FailureReason::ConfigError => "ConfigError",
            FailureReason::MissingOrderID => "MissingOrderID",
            FailureReason::InvalidRequest => "InvalidRequest",
            FailureReason::AuthError => "AuthError",
            FailureReason::UpstreamError => "UpstreamError",
            FailureReason::MissingApprovalLink => "MissingApprovalLink",
            FailureReason::ServerError => "ServerError",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FailureReason {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FailureReason::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or(())
    }
}
