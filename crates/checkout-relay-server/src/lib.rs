//! HTTP front for the checkout relay.
//!
//! Two browser-facing endpoints chained by processor redirects:
//!
//! - `/api/create-order` creates an order and 302s to the approval page;
//! - `/api/order-status` is the processor's return URL: it captures the
//!   order and 302s to the success or failure page.
//!
//! # Modules
//!
//! - [`config`]: [`RelayConfig`] loaded from the environment
//! - [`routes`]: HTTP handlers (create-order, order-status, health, metrics)
//! - [`state`]: Shared [`AppState`]
//! - [`error`]: JSON error responses for the create-order endpoint
//! - [`redirect`]: 302 builders for approval, success and failure pages
//! - [`metrics`]: Prometheus counters for orders and captures

pub mod config;
pub mod error;
pub mod metrics;
pub mod redirect;
pub mod routes;
pub mod state;

pub use config::{ErrorMode, RelayConfig};
pub use error::InitiatorError;
pub use state::AppState;
