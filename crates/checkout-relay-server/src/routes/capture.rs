use actix_web::{get, web, HttpRequest, HttpResponse};
use relay::{CaptureResult, FailureReason, ProcessorError};

use crate::metrics;
use crate::redirect;
use crate::state::AppState;

/// First non-blank `token` value in the return redirect's query. The
/// processor names the order id `token`.
pub fn order_token(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "token")
        .map(|(_, value)| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Where a capture attempt sends the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Funds captured; carries the processor's order id.
    Completed(String),
    /// The processor answered but did not complete the capture.
    Declined,
    /// No usable answer from the processor.
    Failed,
}

impl CaptureOutcome {
    pub fn from_result(result: &Result<CaptureResult, ProcessorError>) -> Self {
        match result {
            Ok(capture) if capture.is_completed() => CaptureOutcome::Completed(capture.id.clone()),
            Ok(_) | Err(ProcessorError::Api { .. }) => CaptureOutcome::Declined,
            Err(_) => CaptureOutcome::Failed,
        }
    }
}

/// GET /api/order-status?token=<order id>
///
/// Return URL for the processor: captures the approved order and sends the
/// browser to the success or failure page. Always answers with a 302.
#[get("/api/order-status")]
pub async fn order_status(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let config = &state.config;

    let Some(processor) = state.processor.as_ref() else {
        tracing::error!("capture requested but PayPal credentials are not configured");
        metrics::CAPTURES
            .with_label_values(&[FailureReason::ConfigError.as_str()])
            .inc();
        return redirect::failure_with_reason(&config.failure_url, FailureReason::ConfigError);
    };

    let Some(order_id) = order_token(req.query_string()) else {
        tracing::warn!("return redirect arrived without an order token");
        metrics::CAPTURES
            .with_label_values(&[FailureReason::MissingOrderID.as_str()])
            .inc();
        return redirect::failure_with_reason(&config.failure_url, FailureReason::MissingOrderID);
    };

    let start = std::time::Instant::now();
    let result = processor.capture_order(&order_id).await;
    metrics::UPSTREAM_LATENCY
        .with_label_values(&["capture"])
        .observe(start.elapsed().as_secs_f64());

    match CaptureOutcome::from_result(&result) {
        CaptureOutcome::Completed(captured_id) => {
            metrics::CAPTURES.with_label_values(&["completed"]).inc();
            tracing::info!(order_id = %captured_id, "payment completed");
            let id = if captured_id.is_empty() {
                order_id.as_str()
            } else {
                captured_id.as_str()
            };
            redirect::success(&config.success_url, id)
        }
        CaptureOutcome::Declined => {
            metrics::CAPTURES.with_label_values(&["declined"]).inc();
            match &result {
                Ok(capture) => tracing::warn!(
                    order_id = %order_id,
                    status = capture.status.as_str(),
                    "capture did not complete"
                ),
                Err(e) => tracing::warn!(
                    order_id = %order_id,
                    status = ?e.upstream_status(),
                    issue = ?issue_of(e),
                    error = %e,
                    "capture rejected by processor"
                ),
            }
            redirect::failure_for_order(&config.failure_url, &order_id)
        }
        CaptureOutcome::Failed => {
            metrics::CAPTURES
                .with_label_values(&[FailureReason::ServerError.as_str()])
                .inc();
            if let Err(e) = &result {
                tracing::error!(order_id = %order_id, error = %e, "error during capture");
            }
            redirect::failure_with_reason(&config.failure_url, FailureReason::ServerError)
        }
    }
}

fn issue_of(e: &ProcessorError) -> Option<&str> {
    match e {
        ProcessorError::Api { issue, .. } => issue.as_deref(),
        _ => None,
    }
}
