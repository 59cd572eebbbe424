use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, RETRY_AFTER};
use actix_web::{App, test};
use hopigo::domain::types::UserRole;
use serde_json::{Value, json};

mod common;

fn welcome_payload() -> Value {
    json!({
        "to": "new.user@example.com",
        "template": "welcome",
        "data": { "name": "Amira <script>alert(1)</script>", "action_url": "https://hopigo.app/start" }
    })
}

#[actix_web::test]
async fn test_send_email_renders_and_forwards() {
    let state = common::TestApp::new("test_send_email_ok.db");
    let user = common::seed_user(&state.db.repo(), "sender@example.com", UserRole::Customer);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/functions/v1/send-email")
        .insert_header((AUTHORIZATION, common::bearer(&user)))
        .set_json(welcome_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true, "email_id": "fake-1" }));

    let sent = state.provider.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "new.user@example.com");
    assert!(sent[0].html.contains("Amira"));
    assert!(!sent[0].html.contains("<script"));
}

#[actix_web::test]
async fn test_send_email_requires_token() {
    let state = common::TestApp::new("test_send_email_401.db");
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/functions/v1/send-email")
        .set_json(welcome_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/functions/v1/send-email")
        .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
        .set_json(welcome_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert_eq!(state.provider.sent_count(), 0);
}

#[actix_web::test]
async fn test_send_email_rejects_bad_payloads() {
    let state = common::TestApp::new("test_send_email_400.db");
    let user = common::seed_user(&state.db.repo(), "sender@example.com", UserRole::Customer);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let cases = [
        json!({ "to": "a@example.com", "template": "newsletter", "data": {} }),
        json!({ "to": "not-an-email", "template": "welcome", "data": {} }),
        json!({ "to": "a@example.com", "template": "", "data": {} }),
        json!({ "to": "a@example.com", "template": "welcome", "data": [1, 2] }),
        json!({ "to": "a@example.com", "template": "welcome", "data": { "name": { "first": "Sam" } } }),
        json!({
            "to": "a@example.com",
            "template": "password_reset",
            "data": { "reset_link": "https://x\" onmouseover=\"alert(1)" }
        }),
        json!({ "to": "a@example.com", "template": "welcome", "data": { "action_url": "javascript:alert(1)" } }),
    ];
    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/functions/v1/send-email")
            .insert_header((AUTHORIZATION, common::bearer(&user)))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{payload}");
    }
    assert_eq!(state.provider.sent_count(), 0);
}

#[actix_web::test]
async fn test_send_email_rate_limits_the_eleventh_request() {
    let state = common::TestApp::new("test_send_email_429.db");
    let repo = state.db.repo();
    let user = common::seed_user(&repo, "busy@example.com", UserRole::Customer);
    let other = common::seed_user(&repo, "calm@example.com", UserRole::Customer);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    for _ in 0..10 {
        let req = test::TestRequest::post()
            .uri("/functions/v1/send-email")
            .insert_header((AUTHORIZATION, common::bearer(&user)))
            .set_json(welcome_payload())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/functions/v1/send-email")
        .insert_header((AUTHORIZATION, common::bearer(&user)))
        .set_json(welcome_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key(RETRY_AFTER));

    // Limits are tracked per identity.
    let req = test::TestRequest::post()
        .uri("/functions/v1/send-email")
        .insert_header((AUTHORIZATION, common::bearer(&other)))
        .set_json(welcome_payload())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(state.provider.sent_count(), 11);
}

#[actix_web::test]
async fn test_invalid_requests_count_towards_the_limit() {
    let state = common::TestApp::new("test_send_email_429_invalid.db");
    let user = common::seed_user(&state.db.repo(), "sender@example.com", UserRole::Customer);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    for _ in 0..10 {
        let req = test::TestRequest::post()
            .uri("/functions/v1/send-email")
            .insert_header((AUTHORIZATION, common::bearer(&user)))
            .set_payload("{broken")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let req = test::TestRequest::post()
        .uri("/functions/v1/send-email")
        .insert_header((AUTHORIZATION, common::bearer(&user)))
        .set_json(welcome_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_provider_failure_is_a_server_error() {
    let state =
        common::TestApp::with_provider("test_send_email_500.db", common::FakeProvider::failing());
    let user = common::seed_user(&state.db.repo(), "sender@example.com", UserRole::Customer);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/functions/v1/send-email")
        .insert_header((AUTHORIZATION, common::bearer(&user)))
        .set_json(welcome_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("domain not verified")
    );
}

#[actix_web::test]
async fn test_admin_previews_templates() {
    let state = common::TestApp::new("test_email_preview.db");
    let repo = state.db.repo();
    let admin = common::seed_user(&repo, "admin@example.com", UserRole::Admin);
    let customer = common::seed_user(&repo, "customer@example.com", UserRole::Customer);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/admin/v1/email/preview")
        .insert_header((AUTHORIZATION, common::bearer(&customer)))
        .set_json(json!({ "template": "password_reset" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::post()
        .uri("/admin/v1/email/preview")
        .insert_header((AUTHORIZATION, common::bearer(&admin)))
        .set_json(json!({ "template": "password_reset", "data": { "name": "Lena" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["html"].as_str().unwrap().contains("Lena"));
    assert!(body["subject"].is_string());
    assert_eq!(state.provider.sent_count(), 0);
}
