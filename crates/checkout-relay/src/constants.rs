/// Live PayPal REST API.
pub const LIVE_API_BASE: &str = "https://api-m.paypal.com";

/// Sandbox PayPal REST API.
pub const SANDBOX_API_BASE: &str = "https://api-m.sandbox.paypal.com";

/// Credential-exchange endpoint, relative to the API base.
pub const TOKEN_PATH: &str = "/v1/oauth2/token";

/// Order-creation endpoint, relative to the API base.
pub const ORDERS_PATH: &str = "/v2/checkout/orders";

/// Order intent: capture immediately once the payer approves.
pub const INTENT_CAPTURE: &str = "CAPTURE";

/// Link relation carrying the payer approval URL.
pub const APPROVE_REL: &str = "approve";

/// Default settlement currency.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default processor landing-page hint.
pub const DEFAULT_LANDING_PAGE: &str = "NO_PREFERENCE";

/// Default processor user-action hint (skips the extra review step).
pub const DEFAULT_USER_ACTION: &str = "PAY_NOW";

/// Maximum purchase-unit description length accepted by the processor.
pub const MAX_DESCRIPTION_CHARS: usize = 127;

/// Which PayPal deployment the relay talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    #[default]
    Live,
    Sandbox,
}

impl ApiEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            ApiEnvironment::Live => LIVE_API_BASE,
            ApiEnvironment::Sandbox => SANDBOX_API_BASE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiEnvironment::Live => "live",
            ApiEnvironment::Sandbox => "sandbox",
        }
    }
}

impl std::str::FromStr for ApiEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "production" => Ok(ApiEnvironment::Live),
            "sandbox" => Ok(ApiEnvironment::Sandbox),
            other => Err(format!("unknown PayPal environment: {other}")),
        }
    }
}

/// Merchant-side settings sent with every order. Decouples the order
/// builder from deployment-specific URLs and branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub currency_code: String,
    /// Where the processor sends the payer after approval (the capture endpoint).
    pub return_url: String,
    pub cancel_url: String,
    pub brand_name: String,
    pub landing_page: String,
    pub user_action: String,
}

impl CheckoutSettings {
    pub fn new(return_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            currency_code: DEFAULT_CURRENCY.to_string(),
            return_url: return_url.into(),
            cancel_url: cancel_url.into(),
            brand_name: "Checkout".to_string(),
            landing_page: DEFAULT_LANDING_PAGE.to_string(),
            user_action: DEFAULT_USER_ACTION.to_string(),
        }
    }
}
