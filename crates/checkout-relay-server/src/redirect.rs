//! 302 responses toward the processor and the frontend's result pages.

use actix_web::{http::header, HttpResponse};
use relay::FailureReason;
use url::Url;

/// Bare 302 with an empty body.
pub fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `base` with `key=value` appended to its query string.
pub fn with_query(base: &str, key: &str, value: &str) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair(key, value);
            url.into()
        }
        Err(_) => {
            let sep = if base.contains('?') { '&' } else { '?' };
            format!(
                "{base}{sep}{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        }
    }
}

pub fn success(success_url: &str, order_id: &str) -> HttpResponse {
    found(&with_query(success_url, "order", order_id))
}

pub fn failure_for_order(failure_url: &str, order_id: &str) -> HttpResponse {
    found(&with_query(failure_url, "order", order_id))
}

pub fn failure_with_reason(failure_url: &str, reason: FailureReason) -> HttpResponse {
    found(&with_query(failure_url, "message", reason.as_str()))
}
