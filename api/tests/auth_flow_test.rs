//! End-to-end tests for the OTP request/verify endpoints against mocks

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::test_context;
use kas_api::app::create_app;

#[actix_web::test]
async fn test_request_otp_without_email_is_rejected() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/request-otp")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "email wajib");
}

#[actix_web::test]
async fn test_request_otp_sends_code() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/request-otp")
        .set_json(json!({"email": "budi@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP terkirim");

    let code = ctx.mailer.last_code_sent_to("budi@example.com").unwrap();
    assert_eq!(code.len(), 6);
}

#[actix_web::test]
async fn test_register_then_login_flow() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    // registration
    let req = test::TestRequest::post()
        .uri("/auth/request-otp")
        .set_json(json!({"email": "budi@example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = ctx.mailer.last_code_sent_to("budi@example.com").unwrap();

    let req = test::TestRequest::post()
        .uri("/auth/verify-otp")
        .set_json(json!({
            "email": "budi@example.com",
            "otp_code": code,
            "password": "rahasia123",
            "full_name": "Budi Santoso",
            "absen": 7,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "register ok");
    let user_id: uuid::Uuid = body["user_id"].as_str().unwrap().parse().unwrap();

    let profile = ctx.identity.profile_for(user_id).await.unwrap();
    assert_eq!(profile.full_name, "Budi Santoso");
    assert_eq!(profile.role, "user");

    // login with a fresh code
    let req = test::TestRequest::post()
        .uri("/auth/request-otp")
        .set_json(json!({"email": "budi@example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = ctx.mailer.last_code_sent_to("budi@example.com").unwrap();

    let req = test::TestRequest::post()
        .uri("/auth/verify-otp")
        .set_json(json!({"email": "budi@example.com", "otp_code": code}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "login ok");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "budi@example.com");
}

#[actix_web::test]
async fn test_code_cannot_be_replayed() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/request-otp")
        .set_json(json!({"email": "budi@example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = ctx.mailer.last_code_sent_to("budi@example.com").unwrap();

    let register = json!({
        "email": "budi@example.com",
        "otp_code": code,
        "password": "rahasia123",
        "full_name": "Budi",
    });

    let req = test::TestRequest::post()
        .uri("/auth/verify-otp")
        .set_json(register.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/auth/verify-otp")
        .set_json(register)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CODE");
}

#[actix_web::test]
async fn test_wrong_code_is_a_bad_request() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/request-otp")
        .set_json(json!({"email": "budi@example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/auth/verify-otp")
        .set_json(json!({"email": "budi@example.com", "otp_code": "000000"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CODE");
}

#[actix_web::test]
async fn test_fourth_otp_request_is_throttled() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/auth/request-otp")
            .set_json(json!({"email": "budi@example.com"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/auth/request-otp")
        .set_json(json!({"email": "budi@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "RATE_LIMITED");
    assert!(body["details"]["retry_after_seconds"].as_i64().unwrap() > 0);
}

#[actix_web::test]
async fn test_service_info() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "kas-backend");
}
