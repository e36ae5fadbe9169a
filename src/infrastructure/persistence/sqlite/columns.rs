//! 行映射与查询拼接的公共函数

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::application::ports::{ListFilter, RepositoryError};
use crate::domain::Gender;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

pub(super) fn parse_optional_timestamp(
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    value.as_deref().map(parse_timestamp).transpose()
}

pub(super) fn parse_date(value: Option<String>) -> Result<Option<NaiveDate>, RepositoryError> {
    value
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))
        })
        .transpose()
}

pub(super) fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

pub(super) fn parse_gender(value: Option<String>) -> Result<Option<Gender>, RepositoryError> {
    value
        .as_deref()
        .map(|s| {
            s.parse::<Gender>()
                .map_err(|_| RepositoryError::SerializationError(format!("unknown gender: {}", s)))
        })
        .transpose()
}

/// 读操作错误
pub(super) fn read_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

/// 写操作错误，唯一约束冲突映射为 `Duplicate`
pub(super) fn write_error(e: sqlx::Error, what: &str) -> RepositoryError {
    let unique = e
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if unique {
        RepositoryError::Duplicate(what.to_string())
    } else {
        RepositoryError::DatabaseError(e.to_string())
    }
}

/// 把搜索词转成 LIKE 模式，`%` `_` `\` 按字面匹配
pub(super) fn like_pattern(q: &str) -> String {
    let mut escaped = String::with_capacity(q.len() + 2);
    escaped.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// 追加 `WHERE deleted_at IS NULL [AND column LIKE ?]`
pub(super) fn push_live_filter(
    builder: &mut QueryBuilder<'_, Sqlite>,
    search_column: &str,
    filter: &ListFilter,
) {
    builder.push(" WHERE deleted_at IS NULL");
    if let Some(q) = &filter.q {
        builder
            .push(" AND ")
            .push(search_column)
            .push(" LIKE ")
            .push_bind(like_pattern(q))
            .push(" ESCAPE '\\'");
    }
}

/// 追加排序和分页
pub(super) fn push_page(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ListFilter) {
    builder
        .push(" ORDER BY id ASC LIMIT ")
        .push_bind(filter.limit())
        .push(" OFFSET ")
        .push_bind(filter.offset());
}
