//! In-process stand-in for the processor API.
//!
//! Serves scripted replies for the token, create-order, and capture endpoints
//! on an ephemeral local port and records every request it receives.

#![allow(dead_code)]

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Reply {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }
}

/// Replies per endpoint, served in order; the last one repeats.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub token: Vec<Reply>,
    pub create: Vec<Reply>,
    pub capture: Vec<Reply>,
}

struct Shared {
    script: Mutex<Script>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockProcessor {
    pub base_url: String,
    shared: web::Data<Shared>,
}

impl MockProcessor {
    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.shared.requests.lock().unwrap().len()
    }
}

fn next_reply(queue: &mut Vec<Reply>) -> Option<Reply> {
    match queue.len() {
        0 => None,
        1 => Some(queue[0].clone()),
        _ => Some(queue.remove(0)),
    }
}

async fn dispatch(req: HttpRequest, body: web::Bytes, shared: web::Data<Shared>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    shared.requests.lock().unwrap().push(Recorded {
        method: req.method().to_string(),
        path: req.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let path = req.path();
    let reply = {
        let mut script = shared.script.lock().unwrap();
        if path == "/v1/oauth2/token" {
            next_reply(&mut script.token)
        } else if path == "/v2/checkout/orders" {
            next_reply(&mut script.create)
        } else if path.starts_with("/v2/checkout/orders/") && path.ends_with("/capture") {
            next_reply(&mut script.capture)
        } else {
            None
        }
    };

    match reply {
        Some(reply) => HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
            .json(reply.body),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "name": "RESOURCE_NOT_FOUND",
            "message": "no scripted reply"
        })),
    }
}

pub async fn start(script: Script) -> MockProcessor {
    let shared = web::Data::new(Shared {
        script: Mutex::new(script),
        requests: Mutex::new(Vec::new()),
    });
    let app_shared = shared.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_shared.clone())
            .default_service(web::to(dispatch))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    MockProcessor {
        base_url: format!("http://{addr}"),
        shared,
    }
}

pub fn token_ok(token: &str) -> Reply {
    Reply::new(
        200,
        serde_json::json!({
            "scope": "https://uri.paypal.com/services/payments",
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 32400
        }),
    )
}

pub fn order_created(id: &str, approve_href: &str) -> Reply {
    Reply::new(
        201,
        serde_json::json!({
            "id": id,
            "status": "CREATED",
            "links": [
                { "href": format!("https://api.example/v2/checkout/orders/{id}"), "rel": "self", "method": "GET" },
                { "href": approve_href, "rel": "approve", "method": "GET" },
                { "href": format!("https://api.example/v2/checkout/orders/{id}/capture"), "rel": "capture", "method": "POST" }
            ]
        }),
    )
}

pub fn captured(id: &str, status: &str) -> Reply {
    Reply::new(201, serde_json::json!({ "id": id, "status": status }))
}

pub fn already_captured() -> Reply {
    Reply::new(
        422,
        serde_json::json!({
            "name": "UNPROCESSABLE_ENTITY",
            "message": "The requested action could not be performed, semantically incorrect, or failed business validation.",
            "details": [{
                "issue": "ORDER_ALREADY_CAPTURED",
                "description": "Order already captured. If 'intent=CAPTURE' only one capture per order is allowed."
            }]
        }),
    )
}
