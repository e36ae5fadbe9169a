//! 人物资料值对象
//!
//! Person 与 Author 共用：姓名、性别、出生日期

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 姓名最小字符数
pub const FULLNAME_MIN_CHARS: usize = 2;
/// 姓名最大字符数
pub const FULLNAME_MAX_CHARS: usize = 56;

/// 性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err("性别只能是 male 或 female"),
        }
    }
}

/// 姓名
///
/// 不变量:
/// - 长度在 2 到 56 个字符之间（按 Unicode 字符计）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fullname(String);

impl Fullname {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        let len = name.chars().count();
        if len == 0 {
            return Err("姓名不能为空");
        }
        if len < FULLNAME_MIN_CHARS {
            return Err("姓名长度不能少于2字符");
        }
        if len > FULLNAME_MAX_CHARS {
            return Err("姓名长度不能超过56字符");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Fullname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 出生日期，不能晚于 `today`
pub fn check_birth_date(
    birth_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, &'static str> {
    match birth_date {
        Some(date) if date > today => Err("出生日期不能晚于今天"),
        other => Ok(other),
    }
}
