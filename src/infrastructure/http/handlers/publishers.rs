//! Publisher HTTP Handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::application::commands::DeletePublisher;
use crate::application::queries::{GetPublisher, ListPublishers};
use crate::infrastructure::http::auth::CurrentAccount;
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, ListQuery, PageResponse, PublisherRequest, PublisherResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建出版社
pub async fn create_publisher(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    body: Result<Json<PublisherRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<PublisherResponse>>), ApiError> {
    let Json(req) = body?;
    let publisher = state.publishers.create(req.into_create()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PublisherResponse::from(&publisher))),
    ))
}

/// 分页列出出版社
pub async fn list_publishers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PageResponse<PublisherResponse>>>, ApiError> {
    let Query(query) = query?;
    let page = state
        .publishers
        .list(ListPublishers {
            filter: query.into_filter(),
        })
        .await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        |publisher| PublisherResponse::from(&publisher),
    ))))
}

/// 获取出版社详情
pub async fn get_publisher(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<PublisherResponse>>, ApiError> {
    let Path(publisher_id) = id?;
    let publisher = state.publishers.get(GetPublisher { publisher_id }).await?;

    Ok(Json(ApiResponse::success(PublisherResponse::from(
        &publisher,
    ))))
}

/// 更新出版社
pub async fn update_publisher(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PublisherRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PublisherResponse>>, ApiError> {
    let Path(publisher_id) = id?;
    let Json(req) = body?;
    let publisher = state
        .publishers
        .update(req.into_update(publisher_id))
        .await?;

    Ok(Json(ApiResponse::success(PublisherResponse::from(
        &publisher,
    ))))
}

/// 删除出版社（软删除）
pub async fn delete_publisher(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(publisher_id) = id?;
    state
        .publishers
        .delete(DeletePublisher { publisher_id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
