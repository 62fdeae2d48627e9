pub mod capture;
pub mod checkout;
pub mod health;

use actix_web::web;

/// Mount every relay endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(checkout::create_order)
        .service(capture::order_status)
        .service(health::health)
        .service(health::metrics_endpoint);
}
