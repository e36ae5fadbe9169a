//! Credential Ports - 出站端口
//!
//! 密码哈希与 Bearer Token 的抽象接口

use chrono::{DateTime, Utc};
use thiserror::Error;

/// 凭据错误
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issue failed: {0}")]
    Issue(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    Expired,
}

/// 密码哈希端口
pub trait PasswordHasherPort: Send + Sync {
    /// 计算密码哈希（PHC 字符串）
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// 校验密码，哈希格式错误时返回 Err，不匹配时返回 Ok(false)
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, CredentialError>;
}

/// 已签发的 Token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// 有效期（秒）
    pub expires_in: u64,
}

/// Token 中携带的身份信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub account_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Token 服务端口
pub trait TokenServicePort: Send + Sync {
    /// 为账号签发 Token
    fn issue(&self, account_id: i64, username: &str) -> Result<IssuedToken, CredentialError>;

    /// 校验 Token 并返回身份信息
    fn verify(&self, token: &str) -> Result<TokenClaims, CredentialError>;
}
