//! Person DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{trimmed, FieldErrors};
use crate::application::commands::{CreatePerson, UpdatePerson};
use crate::application::PersonRecord;
use crate::domain::Gender;
use crate::infrastructure::http::error::ApiError;

/// 创建 / 更新人员请求
#[derive(Debug, Deserialize)]
pub struct PersonRequest {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub account_id: Option<i64>,
}

impl PersonRequest {
    pub fn into_create(self) -> Result<CreatePerson, ApiError> {
        let mut errors = FieldErrors::default();
        let command = CreatePerson {
            gender: errors.gender(self.gender),
            birth_date: errors.birth_date(self.birth_date),
            fullname: trimmed(self.fullname),
            account_id: self.account_id,
        };
        errors.finish(command)
    }

    pub fn into_update(self, person_id: i64) -> Result<UpdatePerson, ApiError> {
        let mut errors = FieldErrors::default();
        let command = UpdatePerson {
            person_id,
            gender: errors.gender(self.gender),
            birth_date: errors.birth_date(self.birth_date),
            fullname: trimmed(self.fullname),
            account_id: self.account_id,
        };
        errors.finish(command)
    }
}

#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&PersonRecord> for PersonResponse {
    fn from(person: &PersonRecord) -> Self {
        Self {
            id: person.id,
            fullname: person.fullname.clone(),
            gender: person.gender,
            birth_date: person.birth_date,
            account_id: person.account_id,
            created_at: person.created_at.to_rfc3339(),
            updated_at: person.updated_at.to_rfc3339(),
        }
    }
}
