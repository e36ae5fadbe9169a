//! Publisher DTOs

use serde::{Deserialize, Serialize};

use super::common::{trimmed, trimmed_opt};
use crate::application::commands::{CreatePublisher, UpdatePublisher};
use crate::application::PublisherRecord;

/// 创建 / 更新出版社请求
#[derive(Debug, Deserialize)]
pub struct PublisherRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

impl PublisherRequest {
    pub fn into_create(self) -> CreatePublisher {
        CreatePublisher {
            name: trimmed(self.name),
            city: trimmed_opt(self.city),
        }
    }

    pub fn into_update(self, publisher_id: i64) -> UpdatePublisher {
        UpdatePublisher {
            publisher_id,
            name: trimmed(self.name),
            city: trimmed_opt(self.city),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublisherResponse {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&PublisherRecord> for PublisherResponse {
    fn from(publisher: &PublisherRecord) -> Self {
        Self {
            id: publisher.id,
            name: publisher.name.clone(),
            city: publisher.city.clone(),
            created_at: publisher.created_at.to_rfc3339(),
            updated_at: publisher.updated_at.to_rfc3339(),
        }
    }
}
