//! Account Commands

/// 创建账号命令
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub password: String,
}

/// 修改密码命令
///
/// 只允许账号本人修改：`actor_id` 必须等于 `account_id`
#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub account_id: i64,
    pub actor_id: i64,
    pub current_password: String,
    pub new_password: String,
}

/// 删除账号命令
#[derive(Debug, Clone)]
pub struct DeleteAccount {
    pub account_id: i64,
}

/// 登录命令
#[derive(Debug, Clone)]
pub struct Login {
    pub username: String,
    pub password: String,
}
