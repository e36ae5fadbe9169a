//! 应用层错误定义
//!
//! 统一的服务层错误类型

use thiserror::Error;

use crate::application::ports::{CredentialError, RepositoryError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到（不存在或已软删除）
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: i64,
    },

    /// 单个字段校验失败
    #[error("Invalid field `{field}`: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 唯一约束冲突
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 未认证或凭据无效
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 已认证但无权操作
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建字段校验错误
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建未认证错误
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(msg) => Self::Conflict(msg),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<CredentialError> for ApplicationError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidToken(_) | CredentialError::Expired => {
                Self::Unauthorized(err.to_string())
            }
            other => Self::InternalError(other.to_string()),
        }
    }
}

/// 把值对象的校验结果映射到字段错误
pub(crate) trait FieldResultExt<T> {
    fn field(self, field: &'static str) -> Result<T, ApplicationError>;
}

impl<T> FieldResultExt<T> for Result<T, &'static str> {
    fn field(self, field: &'static str) -> Result<T, ApplicationError> {
        self.map_err(|message| ApplicationError::invalid_field(field, message))
    }
}

/// 仓储 `NotFound` 映射为带资源类型的 `ApplicationError::NotFound`
pub(crate) fn missing(
    resource_type: &'static str,
    id: i64,
) -> impl FnOnce(RepositoryError) -> ApplicationError {
    move |err| match err {
        RepositoryError::NotFound(_) => ApplicationError::not_found(resource_type, id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err: ApplicationError = RepositoryError::Duplicate("username".into()).into();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[test]
    fn test_missing_keeps_resource_type() {
        let err = missing("Author", 7)(RepositoryError::NotFound("authors/7".into()));
        assert!(matches!(
            err,
            ApplicationError::NotFound { resource_type: "Author", id: 7 }
        ));

        let err = missing("Author", 7)(RepositoryError::DatabaseError("locked".into()));
        assert!(matches!(err, ApplicationError::RepositoryError(_)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let err: ApplicationError = CredentialError::Expired.into();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
