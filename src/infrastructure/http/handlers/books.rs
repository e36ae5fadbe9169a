//! Book HTTP Handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::application::commands::DeleteBook;
use crate::application::queries::{GetBook, ListBooks};
use crate::infrastructure::http::auth::CurrentAccount;
use crate::infrastructure::http::dto::{
    ApiResponse, BookRequest, BookResponse, Empty, ListQuery, PageResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建图书
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<BookResponse>>), ApiError> {
    let Json(req) = body?;
    let book = state.books.create(req.into_create()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookResponse::from(&book))),
    ))
}

/// 分页列出图书
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PageResponse<BookResponse>>>, ApiError> {
    let Query(query) = query?;
    let page = state
        .books
        .list(ListBooks {
            filter: query.into_filter(),
        })
        .await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        |book| BookResponse::from(&book),
    ))))
}

/// 获取图书详情
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let Path(book_id) = id?;
    let book = state.books.get(GetBook { book_id }).await?;

    Ok(Json(ApiResponse::success(BookResponse::from(&book))))
}

/// 更新图书
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let Path(book_id) = id?;
    let Json(req) = body?;
    let book = state.books.update(req.into_update(book_id)?).await?;

    Ok(Json(ApiResponse::success(BookResponse::from(&book))))
}

/// 删除图书（软删除）
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(book_id) = id?;
    state.books.delete(DeleteBook { book_id }).await?;

    Ok(Json(ApiResponse::ok()))
}
