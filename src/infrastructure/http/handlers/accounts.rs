//! Account HTTP Handlers
//!
//! 除登录外都需要 Bearer Token

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::application::commands::DeleteAccount;
use crate::application::queries::{GetAccount, ListAccounts};
use crate::infrastructure::http::auth::CurrentAccount;
use crate::infrastructure::http::dto::{
    AccountResponse, ApiResponse, ChangePasswordRequest, CreateAccountRequest, Empty,
    ListQuery, LoginRequest, LoginResponse, PageResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 登录，签发 Bearer Token
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let Json(req) = body?;
    let result = state.accounts.login(req.into_command()).await?;

    Ok(Json(ApiResponse::success(LoginResponse::from(result))))
}

/// 创建账号
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    body: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    let Json(req) = body?;
    let account = state.accounts.create(req.into_command()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AccountResponse::from(&account))),
    ))
}

/// 分页列出账号
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PageResponse<AccountResponse>>>, ApiError> {
    let Query(query) = query?;
    let page = state
        .accounts
        .list(ListAccounts {
            filter: query.into_filter(),
        })
        .await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        |account| AccountResponse::from(&account),
    ))))
}

/// 当前登录账号
pub async fn current_account(
    CurrentAccount(account): CurrentAccount,
) -> Json<ApiResponse<AccountResponse>> {
    Json(ApiResponse::success(AccountResponse::from(&account)))
}

/// 获取账号详情
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let Path(account_id) = id?;
    let account = state.accounts.get(GetAccount { account_id }).await?;

    Ok(Json(ApiResponse::success(AccountResponse::from(&account))))
}

/// 修改密码（仅限本人）
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    actor: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(account_id) = id?;
    let Json(req) = body?;
    state
        .accounts
        .change_password(req.into_command(account_id, actor.id()))
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 删除账号（软删除）
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(account_id) = id?;
    state.accounts.delete(DeleteAccount { account_id }).await?;

    Ok(Json(ApiResponse::ok()))
}
