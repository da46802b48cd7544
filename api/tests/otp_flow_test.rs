//! End-to-end tests for the request/verify flow over the HTTP layer
//!
//! The handlers run against the in-memory store and the mock SMS service,
//! so every status mapping can be exercised without external services.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use std::sync::Arc;

use pv_api::handlers::json_error_handler;
use pv_api::middleware::BasicAuth;
use pv_api::routes::otp::{configure, AppState};
use pv_core::repositories::otp::{MockOtpStore, OtpStore};
use pv_core::services::otp::OtpService;
use pv_infra::sms::{MockSmsService, SmsSenderAdapter, SmsService};
use pv_shared::config::OtpConfig;

const NUMBER: &str = "15551234567";

type TestService = OtpService<SmsSenderAdapter, MockOtpStore>;

fn build_state(store: Arc<MockOtpStore>, sms: Arc<dyn SmsService>) -> web::Data<AppState<SmsSenderAdapter, MockOtpStore>> {
    let sender = Arc::new(SmsSenderAdapter::new(sms));
    let otp_service: Arc<TestService> =
        Arc::new(OtpService::new(sender, store, OtpConfig::default()));
    web::Data::new(AppState { otp_service })
}

async fn init_app(
    store: Arc<MockOtpStore>,
    sms: Arc<dyn SmsService>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(build_state(store, sms))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(configure::<SmsSenderAdapter, MockOtpStore>),
    )
    .await
}

async fn post(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    path: &str,
    body: Value,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri(path)
        .set_json(&body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

async fn stored_code(store: &MockOtpStore) -> String {
    store
        .find_by_number(NUMBER)
        .await
        .unwrap()
        .expect("record should exist")
        .code
}

#[actix_rt::test]
async fn test_request_code_returns_sent() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store.clone(), Arc::new(MockSmsService::new())).await;

    let (status, body) = post(
        &app,
        "/request",
        json!({ "number": NUMBER, "lsp": "Acme Telecom", "order_ref": "R1" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sent");
    assert!(store.find_by_number(NUMBER).await.unwrap().is_some());
}

#[actix_rt::test]
async fn test_request_code_accepts_legacy_field_names() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store.clone(), Arc::new(MockSmsService::new())).await;

    let (status, body) = post(
        &app,
        "/request",
        json!({ "Number": NUMBER, "LSP": "Acme Telecom", "OR": "R1" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sent");
}

#[actix_rt::test]
async fn test_request_code_rejects_empty_fields() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store.clone(), Arc::new(MockSmsService::new())).await;

    let (status, body) = post(
        &app,
        "/request",
        json!({ "number": NUMBER, "lsp": "", "order_ref": "R1" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Missing required fields"));
    assert!(store.is_empty().await);
}

#[actix_rt::test]
async fn test_request_code_delivery_failure_maps_to_bad_gateway() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store.clone(), Arc::new(MockSmsService::failing())).await;

    let (status, body) = post(
        &app,
        "/request",
        json!({ "number": NUMBER, "lsp": "Acme Telecom", "order_ref": "R1" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to send SMS");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Simulated SMS sending failure"));

    // Rollback property: the undelivered code is gone
    assert!(store.is_empty().await);
}

#[actix_rt::test]
async fn test_verify_unknown_number_returns_not_found() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store, Arc::new(MockSmsService::new())).await;

    let (status, body) = post(&app, "/otp", json!({ "number": NUMBER, "code": "1234567" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "OTP not found or expired");
}

#[actix_rt::test]
async fn test_lockout_flow_over_http() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store.clone(), Arc::new(MockSmsService::new())).await;

    let (status, _) = post(
        &app,
        "/request",
        json!({ "number": NUMBER, "lsp": "A", "order_ref": "R1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let code = stored_code(&store).await;

    // First wrong guess leaves one attempt
    let (status, body) = post(&app, "/otp", json!({ "number": NUMBER, "code": "0000000" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["attempts_left"], 1);

    // Second wrong guess locks the record out
    let (status, _) = post(&app, "/otp", json!({ "number": NUMBER, "code": "0000001" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Lockout takes precedence over a correct code
    let (status, _) = post(&app, "/otp", json!({ "number": NUMBER, "code": code })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A fresh request resets the number, and the new code verifies
    let (status, _) = post(
        &app,
        "/request",
        json!({ "number": NUMBER, "lsp": "A", "order_ref": "R1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let code = stored_code(&store).await;

    let (status, body) = post(&app, "/otp", json!({ "number": NUMBER, "code": code })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    // Verifying a resolved record conflicts
    let (status, _) = post(&app, "/otp", json!({ "number": NUMBER, "Code": code })).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_malformed_json_returns_bad_request() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store, Arc::new(MockSmsService::new())).await;

    let req = test::TestRequest::post()
        .uri("/request")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid JSON body");
}

#[actix_rt::test]
async fn test_non_post_method_is_rejected() {
    let store = Arc::new(MockOtpStore::new());
    let app = init_app(store, Arc::new(MockSmsService::new())).await;

    let req = test::TestRequest::get().uri("/request").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_rt::test]
async fn test_basic_auth_gate() {
    let store = Arc::new(MockOtpStore::new());
    let app = test::init_service(
        App::new()
            .wrap(BasicAuth::new("admin", "secret"))
            .app_data(build_state(store, Arc::new(MockSmsService::new())))
            .configure(configure::<SmsSenderAdapter, MockOtpStore>),
    )
    .await;

    // Missing credentials
    let req = test::TestRequest::post()
        .uri("/request")
        .set_json(json!({ "number": NUMBER, "lsp": "A", "order_ref": "R1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key("www-authenticate"));

    // Wrong credentials
    let bad = format!("Basic {}", BASE64.encode("admin:wrong"));
    let req = test::TestRequest::post()
        .uri("/request")
        .insert_header(("Authorization", bad))
        .set_json(json!({ "number": NUMBER, "lsp": "A", "order_ref": "R1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Correct credentials reach the handler
    let good = format!("Basic {}", BASE64.encode("admin:secret"));
    let req = test::TestRequest::post()
        .uri("/request")
        .insert_header(("Authorization", good))
        .set_json(json!({ "number": NUMBER, "lsp": "A", "order_ref": "R1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Preflight passes the gate without credentials
    let req = test::TestRequest::with_uri("/request")
        .method(actix_web::http::Method::OPTIONS)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.status(), StatusCode::UNAUTHORIZED);
}
