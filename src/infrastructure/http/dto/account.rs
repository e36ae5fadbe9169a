//! Account DTOs

use serde::{Deserialize, Serialize};

use super::common::trimmed;
use crate::application::commands::{ChangePassword, CreateAccount, Login};
use crate::application::{AccountRecord, LoginResult};

/// 缺失的字段按空字符串处理，由服务层报告字段错误
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CreateAccountRequest {
    pub fn into_command(self) -> CreateAccount {
        CreateAccount {
            username: trimmed(self.username),
            password: self.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn into_command(self, account_id: i64, actor_id: i64) -> ChangePassword {
        ChangePassword {
            account_id,
            actor_id,
            current_password: self.current_password,
            new_password: self.new_password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn into_command(self) -> Login {
        Login {
            username: trimmed(self.username),
            password: self.password,
        }
    }
}

/// 账号响应，不包含密码哈希
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AccountRecord> for AccountResponse {
    fn from(account: &AccountRecord) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            created_at: account.created_at.to_rfc3339(),
            updated_at: account.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub account: AccountResponse,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            access_token: result.token.token,
            token_type: "Bearer",
            expires_in: result.token.expires_in,
            account: AccountResponse::from(&result.account),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_account_response_hides_hash() {
        let now = Utc::now();
        let record = AccountRecord {
            id: 3,
            username: "admin".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let json = serde_json::to_string(&AccountResponse::from(&record)).unwrap();
        assert!(json.contains("\"username\":\"admin\""));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_username_trimmed_password_untouched() {
        let command = CreateAccountRequest {
            username: "  admin ".into(),
            password: " Paswd123 ".into(),
        }
        .into_command();
        assert_eq!(command.username, "admin");
        assert_eq!(command.password, " Paswd123 ");
    }
}
