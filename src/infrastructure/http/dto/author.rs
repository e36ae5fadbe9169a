//! Author DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{trimmed, FieldErrors};
use crate::application::commands::{CreateAuthor, UpdateAuthor};
use crate::application::AuthorRecord;
use crate::domain::Gender;
use crate::infrastructure::http::error::ApiError;

/// 创建 / 更新作者请求
///
/// 缺失的 `fullname` 按空字符串处理，由服务层报告字段错误
#[derive(Debug, Deserialize)]
pub struct AuthorRequest {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
}

impl AuthorRequest {
    pub fn into_create(self) -> Result<CreateAuthor, ApiError> {
        let mut errors = FieldErrors::default();
        let command = CreateAuthor {
            gender: errors.gender(self.gender),
            birth_date: errors.birth_date(self.birth_date),
            fullname: trimmed(self.fullname),
        };
        errors.finish(command)
    }

    pub fn into_update(self, author_id: i64) -> Result<UpdateAuthor, ApiError> {
        let mut errors = FieldErrors::default();
        let command = UpdateAuthor {
            author_id,
            gender: errors.gender(self.gender),
            birth_date: errors.birth_date(self.birth_date),
            fullname: trimmed(self.fullname),
        };
        errors.finish(command)
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AuthorRecord> for AuthorResponse {
    fn from(author: &AuthorRecord) -> Self {
        Self {
            id: author.id,
            fullname: author.fullname.clone(),
            gender: author.gender,
            birth_date: author.birth_date,
            created_at: author.created_at.to_rfc3339(),
            updated_at: author.updated_at.to_rfc3339(),
        }
    }
}
