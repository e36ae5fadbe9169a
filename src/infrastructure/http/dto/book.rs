//! Book DTOs

use serde::{Deserialize, Serialize};

use super::common::{trimmed, trimmed_opt, FieldErrors};
use crate::application::commands::{CreateBook, UpdateBook};
use crate::application::BookRecord;
use crate::infrastructure::http::error::ApiError;

/// 创建 / 更新图书请求
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub publisher_id: Option<i64>,
}

impl BookRequest {
    pub fn into_create(self) -> Result<CreateBook, ApiError> {
        let mut errors = FieldErrors::default();
        let command = CreateBook {
            title: trimmed(self.title),
            subtitle: trimmed_opt(self.subtitle),
            author_id: errors.required_id("author_id", self.author_id),
            publisher_id: errors.required_id("publisher_id", self.publisher_id),
        };
        errors.finish(command)
    }

    pub fn into_update(self, book_id: i64) -> Result<UpdateBook, ApiError> {
        let mut errors = FieldErrors::default();
        let command = UpdateBook {
            book_id,
            title: trimmed(self.title),
            subtitle: trimmed_opt(self.subtitle),
            author_id: errors.required_id("author_id", self.author_id),
            publisher_id: errors.required_id("publisher_id", self.publisher_id),
        };
        errors.finish(command)
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub author_id: i64,
    pub publisher_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&BookRecord> for BookResponse {
    fn from(book: &BookRecord) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            subtitle: book.subtitle.clone(),
            author_id: book.author_id,
            publisher_id: book.publisher_id,
            created_at: book.created_at.to_rfc3339(),
            updated_at: book.updated_at.to_rfc3339(),
        }
    }
}
