#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use libris::infrastructure::adapters::{Argon2PasswordHasher, JwtTokenService};
use libris::infrastructure::http::{AppState, HttpServer};
use libris::infrastructure::persistence::sqlite::{
    open_in_memory, SqliteAccountRepository, SqliteAuthorRepository, SqliteBookRepository,
    SqlitePersonRepository, SqlitePublisherRepository,
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Paswd123";

pub struct TestApp {
    pub router: Router,
    pub admin_token: String,
}

/// 内存数据库 + 管理员账号 + 已登录的 Token
pub async fn spawn_app() -> TestApp {
    let pool = open_in_memory().await.expect("in-memory database");

    let state = AppState::new(
        Arc::new(SqliteAccountRepository::new(pool.clone())),
        Arc::new(SqlitePersonRepository::new(pool.clone())),
        Arc::new(SqliteAuthorRepository::new(pool.clone())),
        Arc::new(SqlitePublisherRepository::new(pool.clone())),
        Arc::new(SqliteBookRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new("integration-pepper").expect("hasher")),
        Arc::new(JwtTokenService::new("integration-secret-0123456789", 3600)),
    );
    state
        .accounts
        .ensure_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("bootstrap admin");

    let router = HttpServer::with_default_config(state).router();
    let admin_token = login(&router, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    TestApp {
        router,
        admin_token,
    }
}

pub async fn login(router: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["access_token"]
        .as_str()
        .expect("access_token in login response")
        .to_string()
}

/// 发送 JSON 请求，返回状态码和解析后的响应体（空响应体为 Null）
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// 创建资源并返回新 ID
pub async fn create(app: &TestApp, uri: &str, body: Value) -> i64 {
    let (status, response) = send(
        &app.router,
        Method::POST,
        uri,
        Some(&app.admin_token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {response}");
    response["data"]["id"].as_i64().expect("id in response")
}
