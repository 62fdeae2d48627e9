use relay::constants::{DEFAULT_CURRENCY, DEFAULT_LANDING_PAGE, DEFAULT_USER_ACTION};
use relay::{ApiEnvironment, AuthMode, CheckoutSettings, ClientCredentials};
use std::env;
use url::Url;

const DEFAULT_PORT: u16 = 4030;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:4030";
const DEFAULT_BRAND_NAME: &str = "Checkout";
const DEFAULT_RATE_LIMIT_RPM: u32 = 60;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Path of the capture endpoint; the processor's return URL points here.
pub const ORDER_STATUS_PATH: &str = "/api/order-status";

/// How the create-order endpoint reports failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// JSON error body with a status reflecting the failure class.
    #[default]
    Json,
    /// 302 to the failure page with `?message=<reason>`.
    Redirect,
}

impl std::str::FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ErrorMode::Json),
            "redirect" => Ok(ErrorMode::Redirect),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct RelayConfig {
    /// PayPal client id and secret (None = not configured; every order call fails)
    pub credentials: Option<ClientCredentials>,
    pub auth_mode: AuthMode,
    pub environment: ApiEnvironment,
    /// Processor API base URL (derived from `environment` unless overridden)
    pub api_base: String,
    /// Currency, return/cancel URLs and branding sent with each order
    pub checkout: CheckoutSettings,
    /// Success page; `?order=<id>` is appended
    pub success_url: String,
    /// Failure page; `?order=<id>` or `?message=<reason>` is appended
    pub failure_url: String,
    pub error_mode: ErrorMode,
    /// Outbound request timeout
    pub http_timeout_secs: u64,
    pub port: u16,
    /// Rate limit requests per minute per client IP
    pub rate_limit_rpm: u32,
    /// Bearer token required for /metrics endpoint
    pub metrics_token: Option<String>,
    /// Serve /metrics without a token when no METRICS_TOKEN is set
    pub public_metrics: bool,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("credentials", &self.credentials)
            .field("auth_mode", &self.auth_mode)
            .field("environment", &self.environment)
            .field("api_base", &self.api_base)
            .field("checkout", &self.checkout)
            .field("success_url", &self.success_url)
            .field("failure_url", &self.failure_url)
            .field("error_mode", &self.error_mode)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("port", &self.port)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("public_metrics", &self.public_metrics)
            .finish()
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        // Credentials are checked per request and by `validate()`.
        let credentials = match (get("PAYPAL_CLIENT_ID"), get("PAYPAL_CLIENT_SECRET")) {
            (Some(id), Some(secret)) => Some(ClientCredentials::new(id, secret)),
            _ => None,
        };

        let auth_mode = match get("PAYPAL_AUTH_MODE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PAYPAL_AUTH_MODE", raw))?,
            None => AuthMode::default(),
        };

        let environment = match get("PAYPAL_ENVIRONMENT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PAYPAL_ENVIRONMENT", raw))?,
            None => ApiEnvironment::default(),
        };

        let api_base = match get("PAYPAL_API_BASE") {
            Some(url) => validate_url(url)?,
            None => environment.base_url().to_string(),
        };

        let public_base = validate_url(
            get("PUBLIC_BASE_URL").unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
        )?;
        let public_base = public_base.trim_end_matches('/').to_string();

        let return_url = validate_url(
            get("RETURN_URL").unwrap_or_else(|| format!("{public_base}{ORDER_STATUS_PATH}")),
        )?;
        let cancel_url =
            validate_url(get("CANCEL_URL").unwrap_or_else(|| format!("{public_base}/cancel")))?;
        let success_url =
            validate_url(get("SUCCESS_URL").unwrap_or_else(|| format!("{public_base}/success")))?;
        let failure_url =
            validate_url(get("FAILURE_URL").unwrap_or_else(|| format!("{public_base}/failure")))?;

        let currency_code = get("CURRENCY_CODE")
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        if currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue("CURRENCY_CODE", currency_code));
        }

        let checkout = CheckoutSettings {
            currency_code,
            return_url,
            cancel_url,
            brand_name: get("BRAND_NAME").unwrap_or_else(|| DEFAULT_BRAND_NAME.to_string()),
            landing_page: get("LANDING_PAGE").unwrap_or_else(|| DEFAULT_LANDING_PAGE.to_string()),
            user_action: get("USER_ACTION").unwrap_or_else(|| DEFAULT_USER_ACTION.to_string()),
        };

        let error_mode = match get("INITIATOR_ERROR_MODE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("INITIATOR_ERROR_MODE", raw))?,
            None => ErrorMode::default(),
        };

        let http_timeout_secs = get("HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        let port = get("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let rate_limit_rpm = get("RATE_LIMIT_RPM")
            .and_then(|s| s.parse().ok())
            .filter(|&rpm: &u32| rpm > 0)
            .unwrap_or(DEFAULT_RATE_LIMIT_RPM);

        let metrics_token = get("METRICS_TOKEN");
        let public_metrics = get("PUBLIC_METRICS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            credentials,
            auth_mode,
            environment,
            api_base,
            checkout,
            success_url,
            failure_url,
            error_mode,
            http_timeout_secs,
            port,
            rate_limit_rpm,
            metrics_token,
            public_metrics,
        })
    }

    /// Startup check: the binary refuses to run without credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.is_none() {
            return Err(ConfigError::MissingCredentials);
        }
        if self.metrics_token.is_none() && !self.public_metrics {
            tracing::warn!("METRICS_TOKEN not set, /metrics is disabled");
        }
        Ok(())
    }
}

fn validate_url(raw: String) -> Result<String, ConfigError> {
    match Url::parse(&raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(raw),
        _ => Err(ConfigError::InvalidUrl(raw)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PAYPAL_CLIENT_ID and PAYPAL_CLIENT_SECRET must both be set")]
    MissingCredentials,

    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
