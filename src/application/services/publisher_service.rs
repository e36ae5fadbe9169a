//! Publisher Service

use std::sync::Arc;

use crate::application::commands::{CreatePublisher, DeletePublisher, UpdatePublisher};
use crate::application::error::{missing, ApplicationError, FieldResultExt};
use crate::application::ports::{PublisherFields, PublisherRecord, PublisherRepositoryPort};
use crate::application::queries::{GetPublisher, ListPublishers, Page};
use crate::domain::catalog::{check_city, PublisherName};

/// 出版社服务
pub struct PublisherService {
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
}

impl PublisherService {
    pub fn new(publisher_repo: Arc<dyn PublisherRepositoryPort>) -> Self {
        Self { publisher_repo }
    }

    fn validate(name: String, city: Option<String>) -> Result<PublisherFields, ApplicationError> {
        let name = PublisherName::new(name).field("name")?;
        let city = check_city(city).field("city")?;

        Ok(PublisherFields {
            name: name.into_inner(),
            city,
        })
    }

    pub async fn create(
        &self,
        command: CreatePublisher,
    ) -> Result<PublisherRecord, ApplicationError> {
        let fields = Self::validate(command.name, command.city)?;
        let publisher = self.publisher_repo.create(&fields).await?;

        tracing::info!(publisher_id = publisher.id, name = %publisher.name, "Publisher created");

        Ok(publisher)
    }

    pub async fn update(
        &self,
        command: UpdatePublisher,
    ) -> Result<PublisherRecord, ApplicationError> {
        let publisher_id = command.publisher_id;
        let fields = Self::validate(command.name, command.city)?;

        let publisher = self
            .publisher_repo
            .update(publisher_id, &fields)
            .await
            .map_err(missing("Publisher", publisher_id))?;

        tracing::info!(publisher_id, "Publisher updated");

        Ok(publisher)
    }

    pub async fn delete(&self, command: DeletePublisher) -> Result<(), ApplicationError> {
        let publisher_id = command.publisher_id;

        self.publisher_repo
            .soft_delete(publisher_id)
            .await
            .map_err(missing("Publisher", publisher_id))?;

        tracing::info!(publisher_id, "Publisher deleted");

        Ok(())
    }

    pub async fn get(&self, query: GetPublisher) -> Result<PublisherRecord, ApplicationError> {
        self.publisher_repo
            .find_by_id(query.publisher_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Publisher", query.publisher_id))
    }

    pub async fn list(
        &self,
        query: ListPublishers,
    ) -> Result<Page<PublisherRecord>, ApplicationError> {
        let filter = query.filter;
        let items = self.publisher_repo.find_all(&filter).await?;
        let total = self.publisher_repo.count(&filter).await?;

        Ok(Page {
            items,
            page: filter.page,
            per_page: filter.per_page,
            total,
        })
    }
}
