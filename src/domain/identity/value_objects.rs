//! Identity Context - Value Objects

use serde::{Deserialize, Serialize};

/// 账号用户名
///
/// 不变量:
/// - 长度 3 到 32
/// - 只允许 ASCII 字母、数字以及 `_` `.` `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub fn new(username: impl Into<String>) -> Result<Self, &'static str> {
        let username = username.into();
        if username.is_empty() {
            return Err("用户名不能为空");
        }
        if username.len() < 3 {
            return Err("用户名长度不能少于3字符");
        }
        if username.len() > 32 {
            return Err("用户名长度不能超过32字符");
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err("用户名只能包含字母、数字、下划线、点和连字符");
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 明文密码，只在创建账号/修改密码时短暂存在
///
/// Debug 输出不包含明文
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Result<Self, &'static str> {
        let password = password.into();
        let len = password.chars().count();
        if len < 8 {
            return Err("密码长度不能少于8字符");
        }
        if len > 64 {
            return Err("密码长度不能超过64字符");
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}
