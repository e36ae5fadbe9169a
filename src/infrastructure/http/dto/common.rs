//! 通用响应结构与分页参数

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::{ListFilter, Page};
use crate::domain::Gender;
use crate::infrastructure::http::error::ApiError;

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self::success(Empty {})
    }
}

/// 列表查询参数 `?q=&page=&per_page=`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub fn into_filter(self) -> ListFilter {
        ListFilter::new(self.q, self.page, self.per_page)
    }
}

/// 分页响应
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T: Serialize> PageResponse<T> {
    pub fn from_page<R>(page: Page<R>, f: impl FnMut(R) -> T) -> Self {
        let page = page.map(f);
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
        }
    }
}

pub(super) fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// 去掉首尾空白，空字符串视为未设置
pub(super) fn trimmed_opt(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 收集请求体里的字段格式错误
///
/// 请求 DTO 的字段都以宽松类型反序列化，缺失或格式不对的字段在这里
/// 变成字段错误，而不是整个请求体解析失败
#[derive(Debug, Default)]
pub(super) struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub(super) fn gender(&mut self, value: Option<String>) -> Option<Gender> {
        let value = trimmed_opt(value)?;
        match value.parse() {
            Ok(gender) => Some(gender),
            Err(message) => {
                self.add("gender", message);
                None
            }
        }
    }

    pub(super) fn birth_date(&mut self, value: Option<String>) -> Option<NaiveDate> {
        let value = trimmed_opt(value)?;
        match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.add("birth_date", "出生日期格式应为 YYYY-MM-DD");
                None
            }
        }
    }

    pub(super) fn required_id(&mut self, field: &str, value: Option<i64>) -> i64 {
        match value {
            Some(id) => id,
            None => {
                self.add(field, "不能为空");
                0
            }
        }
    }

    pub(super) fn finish<T>(self, value: T) -> Result<T, ApiError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::Validation(self.0))
        }
    }
}
