//! Author HTTP Handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::application::commands::DeleteAuthor;
use crate::application::queries::{GetAuthor, ListAuthors};
use crate::infrastructure::http::auth::CurrentAccount;
use crate::infrastructure::http::dto::{
    ApiResponse, AuthorRequest, AuthorResponse, Empty, ListQuery, PageResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建作者
pub async fn create_author(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    body: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AuthorResponse>>), ApiError> {
    let Json(req) = body?;
    let author = state.authors.create(req.into_create()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AuthorResponse::from(&author))),
    ))
}

/// 分页列出作者
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PageResponse<AuthorResponse>>>, ApiError> {
    let Query(query) = query?;
    let page = state
        .authors
        .list(ListAuthors {
            filter: query.into_filter(),
        })
        .await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        |author| AuthorResponse::from(&author),
    ))))
}

/// 获取作者详情
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<AuthorResponse>>, ApiError> {
    let Path(author_id) = id?;
    let author = state.authors.get(GetAuthor { author_id }).await?;

    Ok(Json(ApiResponse::success(AuthorResponse::from(&author))))
}

/// 更新作者
pub async fn update_author(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthorResponse>>, ApiError> {
    let Path(author_id) = id?;
    let Json(req) = body?;
    let author = state.authors.update(req.into_update(author_id)?).await?;

    Ok(Json(ApiResponse::success(AuthorResponse::from(&author))))
}

/// 删除作者（软删除）
pub async fn delete_author(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(author_id) = id?;
    state.authors.delete(DeleteAuthor { author_id }).await?;

    Ok(Json(ApiResponse::ok()))
}
