mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;

use common::{create, send, send_request, spawn_app, TestApp};

async fn seed_author_and_publisher(app: &TestApp) -> (i64, i64) {
    let author_id = create(app, "/api/authors", json!({ "fullname": "Ahmad Tohari" })).await;
    let publisher_id = create(
        app,
        "/api/publishers",
        json!({ "name": "Gramedia", "city": " Jakarta " }),
    )
    .await;
    (author_id, publisher_id)
}

#[tokio::test]
async fn publisher_and_book_flow() {
    let app = spawn_app().await;
    let (author_id, publisher_id) = seed_author_and_publisher(&app).await;

    let (status, body) = send(
        &app.router,
        Method::GET,
        &format!("/api/publishers/{publisher_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["city"], "Jakarta");

    let book_id = create(
        &app,
        "/api/books",
        json!({
            "title": "Ronggeng Dukuh Paruk",
            "subtitle": "",
            "author_id": author_id,
            "publisher_id": publisher_id,
        }),
    )
    .await;

    let (status, body) = send(&app.router, Method::GET, &format!("/api/books/{book_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Ronggeng Dukuh Paruk");
    assert!(body["data"]["subtitle"].is_null());
    assert_eq!(body["data"]["author_id"], author_id);

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/books/{book_id}"),
        Some(&app.admin_token),
        Some(json!({
            "title": "Ronggeng Dukuh Paruk",
            "subtitle": "Catatan Buat Emak",
            "author_id": author_id,
            "publisher_id": publisher_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subtitle"], "Catatan Buat Emak");

    let (status, body) = send(&app.router, Method::GET, "/api/books?q=dukuh", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/books/{book_id}"),
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app.router, Method::GET, "/api/books", None, None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn book_requires_live_references() {
    let app = spawn_app().await;
    let (author_id, publisher_id) = seed_author_and_publisher(&app).await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/books",
        Some(&app.admin_token),
        Some(json!({ "title": "Orphan", "author_id": 9999, "publisher_id": publisher_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["author_id"].is_string(), "body: {body}");

    // 软删除的出版社不能再被引用
    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/publishers/{publisher_id}"),
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/books",
        Some(&app.admin_token),
        Some(json!({ "title": "Orphan", "author_id": author_id, "publisher_id": publisher_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["publisher_id"].is_string());

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/books",
        Some(&app.admin_token),
        Some(json!({ "title": "   ", "author_id": author_id, "publisher_id": publisher_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["title"].is_string());

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/books",
        Some(&app.admin_token),
        Some(json!({ "title": "No References" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["author_id"].is_string(), "body: {body}");
    assert!(body["fields"]["publisher_id"].is_string(), "body: {body}");
}

#[tokio::test]
async fn publisher_name_is_validated() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/publishers",
        Some(&app.admin_token),
        Some(json!({ "name": "G" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["name"].is_string());
}

#[tokio::test]
async fn person_links_to_single_account() {
    let app = spawn_app().await;
    let account_id = create(
        &app,
        "/api/accounts",
        json!({ "username": "reader", "password": "Paswd123" }),
    )
    .await;

    let person_id = create(
        &app,
        "/api/persons",
        json!({ "fullname": "Siti Nurbaya", "gender": "female", "account_id": account_id }),
    )
    .await;

    let (status, body) = send(&app.router, Method::GET, &format!("/api/persons/{person_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["account_id"], account_id);
    assert_eq!(body["data"]["gender"], "female");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/persons",
        Some(&app.admin_token),
        Some(json!({ "fullname": "Second Profile", "account_id": account_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/persons",
        Some(&app.admin_token),
        Some(json!({ "fullname": "Nobody Home", "account_id": 9999 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["account_id"].is_string());

    let (status, body) = send(&app.router, Method::GET, "/api/persons?q=siti", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    // 删除人员后账号可以关联给新的人员
    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/persons/{person_id}"),
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let relinked_id = create(
        &app,
        "/api/persons",
        json!({ "fullname": "Siti Baru", "account_id": account_id }),
    )
    .await;
    assert_ne!(relinked_id, person_id);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/publishers")
        .header("authorization", format!("Bearer {}", app.admin_token))
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send_request(&app.router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errno"], 400);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = spawn_app().await;
    let (status, _) = send(&app.router, Method::GET, "/api/shelves", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
