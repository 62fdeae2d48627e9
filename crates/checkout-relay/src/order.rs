//! Order request validation and the Orders v2 wire types the relay touches.
//!
//! Only the handful of fields the relay reads or writes are modelled; the
//! processor's responses carry much more, which serde ignores.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{CheckoutSettings, APPROVE_REL, INTENT_CAPTURE, MAX_DESCRIPTION_CHARS};

/// Rejections raised while building an [`OrderRequest`] from inbound input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderRequestError {
    #[error("missing required parameter: amount")]
    MissingAmount,

    #[error("missing required parameter: description")]
    MissingDescription,

    #[error("amount is not a decimal number: {0}")]
    InvalidAmount(String),

    #[error("amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("description exceeds 127 characters")]
    DescriptionTooLong,
}

/// Non-negative currency amount, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAmount(Decimal);

impl OrderAmount {
    /// Parse a decimal string and round it half-away-from-zero to two places.
    pub fn parse(raw: &str) -> Result<Self, OrderRequestError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrderRequestError::MissingAmount);
        }
        let value = Decimal::from_str(trimmed)
            .map_err(|_| OrderRequestError::InvalidAmount(trimmed.to_string()))?;
        if value < Decimal::ZERO {
            return Err(OrderRequestError::NegativeAmount(trimmed.to_string()));
        }

        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        // rescale leaves the value untouched when 96 bits cannot hold the cents
        if rounded.scale() != 2 {
            return Err(OrderRequestError::InvalidAmount(trimmed.to_string()));
        }
        Ok(Self(rounded))
    }

    /// Two-decimal string as sent to the processor (`"5"` becomes `"5.00"`).
    pub fn to_value_string(&self) -> String {
        self.0.to_string()
    }
}

/// A validated request to create one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub amount: OrderAmount,
    pub description: String,
}

impl OrderRequest {
    /// Validate raw query parameters. Presence is checked before format so a
    /// request missing both fields reports the missing amount first.
    pub fn from_params(
        amount: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, OrderRequestError> {
        let amount = amount
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(OrderRequestError::MissingAmount)?;
        let description = description
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(OrderRequestError::MissingDescription)?;

        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(OrderRequestError::DescriptionTooLong);
        }

        Ok(Self {
            amount: OrderAmount::parse(amount)?,
            description: description.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseUnit {
    pub amount: Money,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationContext {
    pub return_url: String,
    pub cancel_url: String,
    pub brand_name: String,
    pub landing_page: String,
    pub user_action: String,
}

/// Body of `POST /v2/checkout/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOrderBody {
    pub intent: String,
    pub purchase_units: Vec<PurchaseUnit>,
    pub application_context: ApplicationContext,
}

impl CreateOrderBody {
    pub fn new(request: &OrderRequest, settings: &CheckoutSettings) -> Self {
        Self {
            intent: INTENT_CAPTURE.to_string(),
            purchase_units: vec![PurchaseUnit {
                amount: Money {
                    currency_code: settings.currency_code.clone(),
                    value: request.amount.to_value_string(),
                },
                description: request.description.clone(),
            }],
            application_context: ApplicationContext {
                return_url: settings.return_url.clone(),
                cancel_url: settings.cancel_url.clone(),
                brand_name: settings.brand_name.clone(),
                landing_page: settings.landing_page.clone(),
                user_action: settings.user_action.clone(),
            },
        }
    }
}

/// HATEOAS link entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkDescription {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// The parts of a create-order response the relay reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

impl CreatedOrder {
    pub fn approval_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == APPROVE_REL)
            .map(|link| link.href.as_str())
    }
}

/// Processor-side order state. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OrderStatus {
    Created,
    Saved,
    Approved,
    Voided,
    Completed,
    PayerActionRequired,
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CREATED" => OrderStatus::Created,
            "SAVED" => OrderStatus::Saved,
            "APPROVED" => OrderStatus::Approved,
            "VOIDED" => OrderStatus::Voided,
            "COMPLETED" => OrderStatus::Completed,
            "PAYER_ACTION_REQUIRED" => OrderStatus::PayerActionRequired,
            _ => OrderStatus::Other(s),
        }
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Saved => "SAVED",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Voided => "VOIDED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::PayerActionRequired => "PAYER_ACTION_REQUIRED",
            OrderStatus::Other(s) => s,
        }
    }
}

/// The parts of a capture response the relay reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptureResult {
    pub id: String,
    pub status: OrderStatus,
}

impl CaptureResult {
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Standard processor error envelope (`{ name, message, details }`).
/// OAuth failures use `{ error, error_description }` instead; both shapes
/// land here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ErrorBody {
    pub fn first_issue(&self) -> Option<&str> {
        self.details.iter().find_map(|d| d.issue.as_deref())
    }
}

/// Response of the client-credentials exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
