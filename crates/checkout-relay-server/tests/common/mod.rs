//! Shared fixtures for the relay's end-to-end tests.

#![allow(dead_code)]

use actix_web::web;

#[path = "../../../checkout-relay/tests/common/mod.rs"]
mod processor;

#[allow(unused_imports)]
pub use processor::*;

pub const SHOP: &str = "https://shop.example";

/// Relay configuration pointed at `api_base`, with `overrides` applied last.
/// An empty override value unsets the key.
pub fn config(api_base: &str, overrides: &[(&str, &str)]) -> relay_server::RelayConfig {
    let mut vars: std::collections::HashMap<String, String> = [
        ("PAYPAL_CLIENT_ID", "client"),
        ("PAYPAL_CLIENT_SECRET", "s3cret"),
        ("PAYPAL_API_BASE", api_base),
        ("PUBLIC_BASE_URL", SHOP),
        ("BRAND_NAME", "Shop Payments"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    relay_server::RelayConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn state(config: relay_server::RelayConfig) -> web::Data<relay_server::AppState> {
    web::Data::new(relay_server::AppState::new(config).unwrap())
}

pub fn location(resp: &actix_web::dev::ServiceResponse) -> Option<String> {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
