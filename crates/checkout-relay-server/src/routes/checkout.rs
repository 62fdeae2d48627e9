use actix_web::{route, web, HttpRequest, HttpResponse};
use relay::{OrderRequest, PendingOrder};
use serde::Deserialize;

use crate::config::ErrorMode;
use crate::error::InitiatorError;
use crate::metrics;
use crate::redirect;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderParams {
    pub amount: Option<String>,
    pub description: Option<String>,
}

/// GET|POST /api/create-order?amount=..&description=..
///
/// Creates an order and sends the browser to the processor's approval page.
#[route("/api/create-order", method = "GET", method = "POST")]
pub async fn create_order(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, InitiatorError> {
    match initiate(&req, &state).await {
        Ok(order) => {
            metrics::ORDERS.with_label_values(&["created"]).inc();
            tracing::info!(
                order_id = %order.id,
                approval_url = %order.approval_url,
                "order created, redirecting to approval"
            );
            Ok(redirect::found(&order.approval_url))
        }
        Err(e) => {
            let reason = e.reason();
            metrics::ORDERS.with_label_values(&[reason.as_str()]).inc();
            match &e {
                InitiatorError::Validation(_) => {
                    tracing::warn!(error = %e, "rejected create-order request")
                }
                _ => tracing::error!(error = %e, reason = %reason, "order creation failed"),
            }

            match state.config.error_mode {
                ErrorMode::Json => Err(e),
                ErrorMode::Redirect => Ok(redirect::failure_with_reason(
                    &state.config.failure_url,
                    reason,
                )),
            }
        }
    }
}

async fn initiate(req: &HttpRequest, state: &AppState) -> Result<PendingOrder, InitiatorError> {
    let processor = state
        .processor
        .as_ref()
        .ok_or(InitiatorError::Configuration)?;

    // Unparseable query strings are treated as carrying no parameters.
    let params = web::Query::<CreateOrderParams>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_default();
    let request =
        OrderRequest::from_params(params.amount.as_deref(), params.description.as_deref())?;

    let start = std::time::Instant::now();
    let result = processor
        .create_order(&request, &state.config.checkout)
        .await;
    metrics::UPSTREAM_LATENCY
        .with_label_values(&["create"])
        .observe(start.elapsed().as_secs_f64());

    Ok(result?)
}
