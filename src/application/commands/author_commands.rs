//! Author Commands

use chrono::NaiveDate;

use crate::domain::Gender;

/// 创建作者命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAuthor {
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
}

/// 更新作者命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAuthor {
    pub author_id: i64,
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
}

/// 删除作者命令
#[derive(Debug, Clone)]
pub struct DeleteAuthor {
    pub author_id: i64,
}
