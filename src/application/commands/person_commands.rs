//! Person Commands

use chrono::NaiveDate;

use crate::domain::Gender;

/// 创建人员命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePerson {
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

/// 更新人员命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePerson {
    pub person_id: i64,
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

/// 删除人员命令
#[derive(Debug, Clone)]
pub struct DeletePerson {
    pub person_id: i64,
}
