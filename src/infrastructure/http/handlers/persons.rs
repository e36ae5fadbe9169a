//! Person HTTP Handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::application::commands::DeletePerson;
use crate::application::queries::{GetPerson, ListPersons};
use crate::infrastructure::http::auth::CurrentAccount;
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, ListQuery, PageResponse, PersonRequest, PersonResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建人员
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    body: Result<Json<PersonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<PersonResponse>>), ApiError> {
    let Json(req) = body?;
    let person = state.persons.create(req.into_create()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PersonResponse::from(&person))),
    ))
}

/// 分页列出人员
pub async fn list_persons(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PageResponse<PersonResponse>>>, ApiError> {
    let Query(query) = query?;
    let page = state
        .persons
        .list(ListPersons {
            filter: query.into_filter(),
        })
        .await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        |person| PersonResponse::from(&person),
    ))))
}

/// 获取人员详情
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<PersonResponse>>, ApiError> {
    let Path(person_id) = id?;
    let person = state.persons.get(GetPerson { person_id }).await?;

    Ok(Json(ApiResponse::success(PersonResponse::from(&person))))
}

/// 更新人员
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PersonRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PersonResponse>>, ApiError> {
    let Path(person_id) = id?;
    let Json(req) = body?;
    let person = state.persons.update(req.into_update(person_id)?).await?;

    Ok(Json(ApiResponse::success(PersonResponse::from(&person))))
}

/// 删除人员（软删除）
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(person_id) = id?;
    state.persons.delete(DeletePerson { person_id }).await?;

    Ok(Json(ApiResponse::ok()))
}
