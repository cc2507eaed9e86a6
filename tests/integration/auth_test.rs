//! Integration tests for login, verification, and bearer enforcement.

use http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use crate::helpers::{TEST_EMAIL, TestApp};

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_token_and_user(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": TEST_EMAIL, "password": crate::helpers::TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].as_str().is_some());
    assert_eq!(response.body["user"]["email"], TEST_EMAIL);
    assert!(response.body["user"]["id"].as_i64().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": TEST_EMAIL, "password": "wrong-password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_field(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": TEST_EMAIL })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_token(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = app
        .request("GET", "/api/auth/verify", None, Some(&app.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], true);
    assert_eq!(response.body["user"]["email"], TEST_EMAIL);

    let response = app
        .request("GET", "/api/auth/verify", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["valid"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_route_requires_bearer(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = app.request("GET", "/api/customers", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/customers", None, Some("garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.call("GET", "/api/customers", None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_is_public(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
}
