#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test;
use serde_json::{Value, json};

use auth_token_service::domain::entities::{Identity, NewIdentity};
use auth_token_service::domain::models::token::{Claims, KeyRole};

use common::{PASSWORD, StaticProbe, context};

fn register_body(username: &str, email: &str) -> Value {
    json!({ "username": username, "email": email, "password": PASSWORD, "display_name": "Tester" })
}

#[actix_web::test]
async fn test_register_returns_public_view() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("alice", "alice@example.com"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["roles"], json!(["user"]));
    assert!(body["data"].get("password_hash").is_none());
    assert_eq!(ctx.store.len(), 1);
}

#[actix_web::test]
async fn test_register_duplicates_conflict() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());

    let first = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("alice", "alice@example.com"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

    let same_email = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("alice2", "alice@example.com"))
        .to_request();
    let res = test::call_service(&app, same_email).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "email already exists");

    let same_username = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("alice", "other@example.com"))
        .to_request();
    let res = test::call_service(&app, same_username).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "username already exists");
}

#[actix_web::test]
async fn test_register_validation_errors() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());

    let weak = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "a@b.com", "password": "weak" }))
        .to_request();
    assert_eq!(test::call_service(&app, weak).await.status(), StatusCode::BAD_REQUEST);

    let broken = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let res = test::call_service(&app, broken).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], false);
}

macro_rules! register_and_login {
    ($app:expr, $username:expr, $email:expr) => {{
        let register = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body($username, $email))
            .to_request();
        assert_eq!(test::call_service($app, register).await.status(), StatusCode::CREATED);

        let login = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": $email, "password": PASSWORD }))
            .to_request();
        let res = test::call_service($app, login).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        body["data"].clone()
    }};
}

#[actix_web::test]
async fn test_login_then_verify() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());

    let pair = register_and_login!(&app, "alice", "alice@example.com");
    assert_eq!(pair["token_type"], "Bearer");
    assert_eq!(pair["expires_in"], 300);

    let verify = test::TestRequest::post()
        .uri("/api/v1/auth/verify")
        .set_json(json!({ "access_token": pair["access_token"] }))
        .to_request();
    let res = test::call_service(&app, verify).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["issuer"], "integration-tests");

    let by_header = test::TestRequest::post()
        .uri("/api/v1/auth/verify")
        .insert_header((
            AUTHORIZATION,
            format!("Bearer {}", pair["access_token"].as_str().unwrap()),
        ))
        .to_request();
    assert_eq!(test::call_service(&app, by_header).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());
    register_and_login!(&app, "alice", "alice@example.com");

    let wrong_password = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "alice@example.com", "password": "Wr0ngPass" }))
        .to_request();
    let res = test::call_service(&app, wrong_password).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body: Value = test::read_body_json(res).await;

    let unknown_user = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "nobody", "password": PASSWORD }))
        .to_request();
    let res = test::call_service(&app, unknown_user).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body: Value = test::read_body_json(res).await;

    assert_eq!(wrong_password_body, unknown_user_body);
}

#[actix_web::test]
async fn test_refresh_rotation_and_replay() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());
    let pair = register_and_login!(&app, "alice", "alice@example.com");
    let stale = pair["refresh_token"].clone();

    let refresh = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": stale }))
        .to_request();
    let res = test::call_service(&app, refresh).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_ne!(body["data"]["refresh_token"], stale);
    assert_eq!(ctx.registry.live_entries(), 1);

    let replay = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": stale }))
        .to_request();
    let res = test::call_service(&app, replay).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "refresh token not found");
}

#[actix_web::test]
async fn test_registry_outage_fails_login() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());

    let register = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("alice", "alice@example.com"))
        .to_request();
    test::call_service(&app, register).await;

    ctx.registry.fail_writes(true);
    let login = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "alice", "password": PASSWORD }))
        .to_request();
    let res = test::call_service(&app, login).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(res).await;
    assert!(body["data"].is_null());
}

#[actix_web::test]
async fn test_profile_requires_access_token() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());
    let pair = register_and_login!(&app, "alice", "alice@example.com");

    let anonymous = test::TestRequest::get().uri("/api/v1/auth/profile").to_request();
    assert_eq!(test::call_service(&app, anonymous).await.status(), StatusCode::UNAUTHORIZED);

    let with_refresh = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header((
            AUTHORIZATION,
            format!("Bearer {}", pair["refresh_token"].as_str().unwrap()),
        ))
        .to_request();
    assert_eq!(test::call_service(&app, with_refresh).await.status(), StatusCode::UNAUTHORIZED);

    let with_access = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header((
            AUTHORIZATION,
            format!("Bearer {}", pair["access_token"].as_str().unwrap()),
        ))
        .to_request();
    let res = test::call_service(&app, with_access).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["username"], "alice");
}

#[actix_web::test]
async fn test_profile_of_removed_account_is_not_found() {
    let ctx = context();
    let ghost = Identity::new(
        &NewIdentity {
            email: Some("ghost@example.com".into()),
            ..NewIdentity::default()
        },
        "unused".to_string(),
    );
    let claims = Claims::for_identity(
        &ghost,
        "integration-tests",
        chrono::Utc::now().timestamp(),
        std::time::Duration::from_secs(300),
    );
    let token = ctx.state.tokens.codec().sign(&claims, KeyRole::Access).unwrap();
    let app = init_app!(ctx.state.clone());

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "account not found");
}

#[actix_web::test]
async fn test_jwks_exposes_access_key_only() {
    let ctx = context();
    let app = init_app!(ctx.state.clone());

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/v1/auth/jwks.json").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["keys"].as_array().unwrap().len(), 1);
    assert_eq!(body["keys"][0]["alg"], "RS256");
}

#[actix_web::test]
async fn test_healthz() {
    let ctx = context();
    let healthy = ctx.state.clone().with_probe(Arc::new(StaticProbe { name: "mongodb", healthy: true }));
    let app = init_app!(healthy);

    let res = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["checks"]["mongodb"], "up");

    let degraded = context()
        .state
        .with_probe(Arc::new(StaticProbe { name: "mongodb", healthy: true }))
        .with_probe(Arc::new(StaticProbe { name: "redis", healthy: false }));
    let app = init_app!(degraded);

    let res = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["redis"], "down");
}
