//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                      GET     健康检查
//! - /api/auth/login                POST    登录，返回 Bearer Token
//! - /api/accounts                  GET/POST  账号列表 / 创建账号
//! - /api/accounts/me               GET     当前账号
//! - /api/accounts/:id              GET/DELETE
//! - /api/accounts/:id/password     PUT     修改密码（仅限本人）
//! - /api/{persons,authors,publishers,books}      GET/POST
//! - /api/{persons,authors,publishers,books}/:id  GET/PUT/DELETE
//!
//! 账号接口全部需要认证；其余资源 GET 公开，写操作需要认证

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/auth/login", post(handlers::login))
        .nest("/accounts", account_routes())
        .nest("/persons", person_routes())
        .nest("/authors", author_routes())
        .nest("/publishers", publisher_routes())
        .nest("/books", book_routes())
}

/// Account 路由
fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route("/me", get(handlers::current_account))
        .route(
            "/:id",
            get(handlers::get_account).delete(handlers::delete_account),
        )
        .route("/:id/password", put(handlers::change_password))
}

/// Person 路由
fn person_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_persons).post(handlers::create_person))
        .route(
            "/:id",
            get(handlers::get_person)
                .put(handlers::update_person)
                .delete(handlers::delete_person),
        )
}

/// Author 路由
fn author_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_authors).post(handlers::create_author))
        .route(
            "/:id",
            get(handlers::get_author)
                .put(handlers::update_author)
                .delete(handlers::delete_author),
        )
}

/// Publisher 路由
fn publisher_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_publishers).post(handlers::create_publisher),
        )
        .route(
            "/:id",
            get(handlers::get_publisher)
                .put(handlers::update_publisher)
                .delete(handlers::delete_publisher),
        )
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/:id",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
}
