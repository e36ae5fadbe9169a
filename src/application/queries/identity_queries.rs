//! Identity Queries - 账号 / 人员

use crate::application::ports::ListFilter;

/// 获取账号详情查询
#[derive(Debug, Clone)]
pub struct GetAccount {
    pub account_id: i64,
}

/// 分页列出账号查询
#[derive(Debug, Clone, Default)]
pub struct ListAccounts {
    pub filter: ListFilter,
}

/// 获取人员详情查询
#[derive(Debug, Clone)]
pub struct GetPerson {
    pub person_id: i64,
}

/// 分页列出人员查询
#[derive(Debug, Clone, Default)]
pub struct ListPersons {
    pub filter: ListFilter,
}
