use actix_web::{get, web, HttpRequest, HttpResponse};
use subtle::ConstantTimeEq;

use crate::metrics;
use crate::state::AppState;

/// GET /health
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let config = &state.config;
    let configured = state.processor.is_some();

    let body = serde_json::json!({
        "status": if configured { "ok" } else { "degraded" },
        "service": "checkout-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": config.environment.as_str(),
        "authMode": config.auth_mode.as_str(),
        "credentialsConfigured": configured,
    });

    if configured {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// GET /metrics, gated by `METRICS_TOKEN` unless `PUBLIC_METRICS` is set
#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match &state.config.metrics_token {
        Some(expected) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|token| bool::from(token.as_bytes().ct_eq(expected.as_bytes())))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "unauthorized",
                    "message": "Valid Bearer token required for /metrics"
                }));
            }
        }
        None => {
            if !state.config.public_metrics {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "forbidden",
                    "message": "Set METRICS_TOKEN or PUBLIC_METRICS=true to access /metrics"
                }));
            }
        }
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}
