use crate::config::RelayConfig;
use relay::{CredentialProvider, ProcessorClient};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    /// Processor client (None when credentials are not configured)
    pub processor: Option<ProcessorClient>,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let processor = config.credentials.clone().map(|credentials| {
            ProcessorClient::new(
                http_client,
                config.api_base.clone(),
                CredentialProvider::new(config.auth_mode, credentials),
            )
        });

        Ok(Self {
            config: Arc::new(config),
            processor,
        })
    }
}
