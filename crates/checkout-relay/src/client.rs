//! HTTP client for the processor's Orders v2 API.
//!
//! Each call obtains a fresh `Authorization` header from the
//! [`CredentialProvider`], performs exactly one order request, and maps the
//! outcome onto [`ProcessorError`]. There is no retry and no caching.

use crate::constants::{CheckoutSettings, ORDERS_PATH};
use crate::credentials::CredentialProvider;
use crate::error::ProcessorError;
use crate::order::{CaptureResult, CreateOrderBody, CreatedOrder, ErrorBody, OrderRequest};

/// An order the payer still has to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pub id: String,
    pub approval_url: String,
}

#[derive(Debug, Clone)]
pub struct ProcessorClient {
    http: reqwest::Client,
    api_base: String,
    credentials: CredentialProvider,
}

impl ProcessorClient {
    pub fn new(
        http: reqwest::Client,
        api_base: impl Into<String>,
        credentials: CredentialProvider,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Create an order and return its approval link.
    pub async fn create_order(
        &self,
        request: &OrderRequest,
        settings: &CheckoutSettings,
    ) -> Result<PendingOrder, ProcessorError> {
        let authorization = self
            .credentials
            .authorization(&self.http, &self.api_base)
            .await?;
        let url = format!("{}{}", self.api_base, ORDERS_PATH);
        let body = CreateOrderBody::new(request, settings);

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let order: CreatedOrder = resp.json().await?;
        let id = order
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(ProcessorError::MissingOrderId)?;
        let Some(approval_url) = order.approval_link().map(str::to_string) else {
            tracing::error!(order_id = %id, links = order.links.len(), "order created without approval link");
            return Err(ProcessorError::MissingApprovalLink { order_id: id });
        };

        Ok(PendingOrder { id, approval_url })
    }

    /// Capture a payer-approved order.
    ///
    /// A 2xx answer is returned as-is whatever its status; callers decide
    /// what a non-`COMPLETED` capture means.
    pub async fn capture_order(&self, order_id: &str) -> Result<CaptureResult, ProcessorError> {
        let authorization = self
            .credentials
            .authorization(&self.http, &self.api_base)
            .await?;
        let url = format!(
            "{}{}/{}/capture",
            self.api_base,
            ORDERS_PATH,
            urlencoding::encode(order_id)
        );

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        Ok(resp.json::<CaptureResult>().await?)
    }
}

/// Turn a non-success processor response into [`ProcessorError::Api`].
async fn api_error(resp: reqwest::Response) -> ProcessorError {
    let status = resp.status();
    let body: ErrorBody = resp.json().await.unwrap_or_default();
    let issue = body.first_issue().map(str::to_string);
    let name = body
        .name
        .or(body.error)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("UNKNOWN").to_string());
    let message = body
        .message
        .or(body.error_description)
        .unwrap_or_else(|| "processor rejected the request".to_string());

    ProcessorError::Api {
        status: status.as_u16(),
        name,
        message,
        issue,
    }
}
