//! Catalog Context - Value Objects

use serde::{Deserialize, Serialize};

/// 书名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Result<Self, &'static str> {
        let title = title.into();
        if title.is_empty() {
            return Err("书名不能为空");
        }
        if title.chars().count() > 128 {
            return Err("书名长度不能超过128字符");
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 副标题（可选，空字符串视为未设置）
pub fn check_subtitle(subtitle: Option<String>) -> Result<Option<String>, &'static str> {
    match subtitle {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) if s.chars().count() > 128 => Err("副标题长度不能超过128字符"),
        other => Ok(other),
    }
}

/// 出版社名称
///
/// 不变量:
/// - 长度 2 到 48 个字符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherName(String);

impl PublisherName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        let len = name.chars().count();
        if len == 0 {
            return Err("出版社名称不能为空");
        }
        if len < 2 {
            return Err("出版社名称长度不能少于2字符");
        }
        if len > 48 {
            return Err("出版社名称长度不能超过48字符");
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

/// 出版社所在城市（可选）
pub fn check_city(city: Option<String>) -> Result<Option<String>, &'static str> {
    match city {
        Some(c) if c.is_empty() => Ok(None),
        Some(c) if c.chars().count() > 32 => Err("城市名称长度不能超过32字符"),
        other => Ok(other),
    }
}
