//! Order relay for the PayPal Orders v2 REST API.
//!
//! Two operations, both thin pass-throughs to the processor:
//!
//! - **create** ([`ProcessorClient::create_order`]): validate an
//!   [`OrderRequest`], create an order with intent `CAPTURE`, and hand back
//!   the payer approval link;
//! - **capture** ([`ProcessorClient::capture_order`]): finalize an approved
//!   order and report the resulting status.
//!
//! Authorization is pluggable through [`CredentialProvider`] (Basic or
//! Bearer). Nothing is persisted; the processor owns all order state.

pub mod client;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod order;
pub mod reason;

pub use client::{PendingOrder, ProcessorClient};
pub use constants::{ApiEnvironment, CheckoutSettings};
pub use credentials::{AuthMode, ClientCredentials, CredentialProvider};
pub use error::ProcessorError;
pub use order::{CaptureResult, OrderAmount, OrderRequest, OrderRequestError, OrderStatus};
pub use reason::FailureReason;
