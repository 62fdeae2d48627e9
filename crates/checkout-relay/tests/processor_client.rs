mod common;

use common::{Reply, Script};
use relay::{
    AuthMode, CheckoutSettings, ClientCredentials, CredentialProvider, OrderRequest,
    OrderStatus, ProcessorClient, ProcessorError,
};

fn settings() -> CheckoutSettings {
    CheckoutSettings::new(
        "https://shop.example/api/order-status",
        "https://shop.example/cancel",
    )
}

fn client(base_url: &str, mode: AuthMode) -> ProcessorClient {
    ProcessorClient::new(
        reqwest::Client::new(),
        base_url,
        CredentialProvider::new(mode, ClientCredentials::new("client", "s3cret")),
    )
}

#[actix_rt::test]
async fn test_create_order_basic_returns_approval_link() {
    let mock = common::start(Script {
        create: vec![common::order_created("ORDER-1", "https://proc.example/approve/123")],
        ..Default::default()
    })
    .await;

    let request = OrderRequest::from_params(Some("19.999"), Some("Gift card")).unwrap();
    let order = client(&mock.base_url, AuthMode::Basic)
        .create_order(&request, &settings())
        .await
        .unwrap();

    assert_eq!(order.id, "ORDER-1");
    assert_eq!(order.approval_url, "https://proc.example/approve/123");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/v2/checkout/orders");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Basic Y2xpZW50OnMzY3JldA==")
    );
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["purchase_units"][0]["amount"]["value"], "20.00");
    assert_eq!(sent["intent"], "CAPTURE");
}

#[actix_rt::test]
async fn test_create_order_bearer_exchanges_token_first() {
    let mock = common::start(Script {
        token: vec![common::token_ok("A21AAF-token")],
        create: vec![common::order_created("ORDER-2", "https://proc.example/approve/2")],
        ..Default::default()
    })
    .await;

    let request = OrderRequest::from_params(Some("5"), Some("Widget")).unwrap();
    client(&mock.base_url, AuthMode::Bearer)
        .create_order(&request, &settings())
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/v1/oauth2/token");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Basic Y2xpZW50OnMzY3JldA==")
    );
    assert_eq!(requests[0].body, "grant_type=client_credentials");
    assert_eq!(requests[1].path, "/v2/checkout/orders");
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer A21AAF-token"));
}

#[actix_rt::test]
async fn test_rejected_token_exchange_is_auth_error() {
    let mock = common::start(Script {
        token: vec![Reply::new(
            401,
            serde_json::json!({
                "error": "invalid_client",
                "error_description": "Client Authentication failed"
            }),
        )],
        ..Default::default()
    })
    .await;

    let request = OrderRequest::from_params(Some("5"), Some("Widget")).unwrap();
    let err = client(&mock.base_url, AuthMode::Bearer)
        .create_order(&request, &settings())
        .await
        .unwrap_err();

    match err {
        ProcessorError::Auth { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Client Authentication failed");
        }
        other => panic!("expected auth error, got {other:?}"),
    }
    // The order call is never attempted.
    assert_eq!(mock.request_count(), 1);
}

#[actix_rt::test]
async fn test_missing_approval_link_is_reported() {
    let mock = common::start(Script {
        create: vec![Reply::new(
            201,
            serde_json::json!({
                "id": "ORDER-3",
                "status": "CREATED",
                "links": [{ "href": "https://api.example/v2/checkout/orders/ORDER-3", "rel": "self" }]
            }),
        )],
        ..Default::default()
    })
    .await;

    let request = OrderRequest::from_params(Some("5"), Some("Widget")).unwrap();
    let err = client(&mock.base_url, AuthMode::Basic)
        .create_order(&request, &settings())
        .await
        .unwrap_err();

    match err {
        ProcessorError::MissingApprovalLink { order_id } => assert_eq!(order_id, "ORDER-3"),
        other => panic!("expected missing approval link, got {other:?}"),
    }
}

#[actix_rt::test]
async fn test_create_rejection_keeps_processor_status() {
    let mock = common::start(Script {
        create: vec![Reply::new(
            400,
            serde_json::json!({
                "name": "INVALID_REQUEST",
                "message": "Request is not well-formed, syntactically incorrect, or violates schema.",
                "details": [{ "issue": "CURRENCY_NOT_SUPPORTED" }]
            }),
        )],
        ..Default::default()
    })
    .await;

    let request = OrderRequest::from_params(Some("5"), Some("Widget")).unwrap();
    let err = client(&mock.base_url, AuthMode::Basic)
        .create_order(&request, &settings())
        .await
        .unwrap_err();

    assert_eq!(err.upstream_status(), Some(400));
    match err {
        ProcessorError::Api { name, issue, .. } => {
            assert_eq!(name, "INVALID_REQUEST");
            assert_eq!(issue.as_deref(), Some("CURRENCY_NOT_SUPPORTED"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[actix_rt::test]
async fn test_capture_encodes_order_id_in_path() {
    let mock = common::start(Script {
        capture: vec![common::captured("A B/1", "COMPLETED")],
        ..Default::default()
    })
    .await;

    let result = client(&mock.base_url, AuthMode::Basic)
        .capture_order("A B/1")
        .await
        .unwrap();

    assert!(result.is_completed());
    let requests = mock.requests();
    assert_eq!(requests[0].path, "/v2/checkout/orders/A%20B%2F1/capture");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[actix_rt::test]
async fn test_capture_non_completed_status_is_returned() {
    let mock = common::start(Script {
        capture: vec![common::captured("O-2", "PAYER_ACTION_REQUIRED")],
        ..Default::default()
    })
    .await;

    let result = client(&mock.base_url, AuthMode::Basic)
        .capture_order("O-2")
        .await
        .unwrap();

    assert_eq!(result.status, OrderStatus::PayerActionRequired);
    assert!(!result.is_completed());
}

#[actix_rt::test]
async fn test_duplicate_capture_reports_already_captured() {
    let mock = common::start(Script {
        capture: vec![common::captured("O-1", "COMPLETED"), common::already_captured()],
        ..Default::default()
    })
    .await;
    let client = client(&mock.base_url, AuthMode::Basic);

    let first = client.capture_order("O-1").await.unwrap();
    assert!(first.is_completed());

    let second = client.capture_order("O-1").await.unwrap_err();
    match second {
        ProcessorError::Api { status, issue, .. } => {
            assert_eq!(status, 422);
            assert_eq!(issue.as_deref(), Some("ORDER_ALREADY_CAPTURED"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[actix_rt::test]
async fn test_unreachable_processor_is_network_error() {
    // Nothing listens on port 1.
    let err = client("http://127.0.0.1:1", AuthMode::Basic)
        .capture_order("O-1")
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessorError::Network(_)));
    assert_eq!(err.upstream_status(), None);
}
