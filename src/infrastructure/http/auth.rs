//! Bearer Token 认证
//!
//! 需要登录的 handler 声明 `CurrentAccount` 参数即可，
//! 缺少、格式错误、过期的 Token 以及已删除账号的 Token 都返回 401

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::error::ApiError;
use super::state::AppState;
use crate::application::AccountRecord;

/// 当前登录账号
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AccountRecord);

impl CurrentAccount {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed authorization header".to_string()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| ApiError::Unauthorized("malformed authorization header".to_string()))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(ApiError::Unauthorized(
            "malformed authorization header".to_string(),
        ));
    }

    Ok(token.trim())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let account = state.accounts.authenticate(token).await?;

        tracing::debug!(account_id = account.id, "Request authenticated");

        Ok(CurrentAccount(account))
    }
}
