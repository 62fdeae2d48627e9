//! Authorization strategies for the processor API.
//!
//! A [`CredentialProvider`] turns the configured client id and secret into a
//! ready-to-use `Authorization` header value, either directly (Basic) or via
//! the client-credentials exchange (Bearer). Nothing is cached: every call to
//! [`CredentialProvider::authorization`] in bearer mode performs a fresh
//! exchange.

use base64::Engine;

use crate::constants::TOKEN_PATH;
use crate::error::ProcessorError;
use crate::order::{AccessToken, ErrorBody};

/// Client id and secret issued by the processor.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }

    /// `Basic base64(client_id:secret)`.
    pub fn basic_header(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.secret);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair)
        )
    }
}

/// Which authorization scheme to present on order calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Basic,
    Bearer,
}

impl AuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthMode::Basic => "basic",
            AuthMode::Bearer => "bearer",
        }
    }
}

impl std::str::FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(AuthMode::Basic),
            "bearer" | "oauth" => Ok(AuthMode::Bearer),
            other => Err(format!("unknown auth mode: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CredentialProvider {
    /// Send the client credentials on every call.
    Basic(ClientCredentials),
    /// Exchange the client credentials for a bearer token first.
    Bearer(ClientCredentials),
}

impl CredentialProvider {
    pub fn new(mode: AuthMode, credentials: ClientCredentials) -> Self {
        match mode {
            AuthMode::Basic => CredentialProvider::Basic(credentials),
            AuthMode::Bearer => CredentialProvider::Bearer(credentials),
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            CredentialProvider::Basic(_) => AuthMode::Basic,
            CredentialProvider::Bearer(_) => AuthMode::Bearer,
        }
    }

    /// Produce the `Authorization` header value for the next processor call.
    pub async fn authorization(
        &self,
        http: &reqwest::Client,
        api_base: &str,
    ) -> Result<String, ProcessorError> {
        match self {
            CredentialProvider::Basic(credentials) => Ok(credentials.basic_header()),
            CredentialProvider::Bearer(credentials) => {
                let token = exchange_token(http, api_base, credentials).await?;
                Ok(format!("Bearer {}", token.access_token))
            }
        }
    }
}

/// `POST /v1/oauth2/token` with `grant_type=client_credentials`.
pub async fn exchange_token(
    http: &reqwest::Client,
    api_base: &str,
    credentials: &ClientCredentials,
) -> Result<AccessToken, ProcessorError> {
    let url = format!("{}{}", api_base.trim_end_matches('/'), TOKEN_PATH);

    let resp = http
        .post(&url)
        .header(reqwest::header::AUTHORIZATION, credentials.basic_header())
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body: ErrorBody = resp.json().await.unwrap_or_default();
        let message = body
            .error_description
            .or(body.message)
            .or(body.error)
            .unwrap_or_else(|| "credential exchange failed".to_string());
        tracing::warn!(status = status.as_u16(), %message, "token exchange rejected");
        return Err(ProcessorError::Auth {
            status: status.as_u16(),
            message,
        });
    }

    let token: AccessToken = resp.json().await?;
    if token.access_token.is_empty() {
        return Err(ProcessorError::Protocol(
            "token response carried an empty access_token".to_string(),
        ));
    }
    tracing::debug!(expires_in = ?token.expires_in, "obtained access token");
    Ok(token)
}
