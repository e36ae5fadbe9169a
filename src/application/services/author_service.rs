//! Author Service

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{CreateAuthor, DeleteAuthor, UpdateAuthor};
use crate::application::error::{missing, ApplicationError, FieldResultExt};
use crate::application::ports::{AuthorFields, AuthorRecord, AuthorRepositoryPort};
use crate::application::queries::{GetAuthor, ListAuthors, Page};
use crate::domain::{check_birth_date, Fullname, Gender};

/// 作者服务
pub struct AuthorService {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl AuthorService {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    fn validate(
        fullname: String,
        gender: Option<Gender>,
        birth_date: Option<chrono::NaiveDate>,
    ) -> Result<AuthorFields, ApplicationError> {
        let fullname = Fullname::new(fullname).field("fullname")?;
        let birth_date =
            check_birth_date(birth_date, Utc::now().date_naive()).field("birth_date")?;

        Ok(AuthorFields {
            fullname: fullname.into_inner(),
            gender,
            birth_date,
        })
    }

    pub async fn create(&self, command: CreateAuthor) -> Result<AuthorRecord, ApplicationError> {
        let fields = Self::validate(command.fullname, command.gender, command.birth_date)?;
        let author = self.author_repo.create(&fields).await?;

        tracing::info!(author_id = author.id, fullname = %author.fullname, "Author created");

        Ok(author)
    }

    pub async fn update(&self, command: UpdateAuthor) -> Result<AuthorRecord, ApplicationError> {
        let author_id = command.author_id;
        let fields = Self::validate(command.fullname, command.gender, command.birth_date)?;

        let author = self
            .author_repo
            .update(author_id, &fields)
            .await
            .map_err(missing("Author", author_id))?;

        tracing::info!(author_id, "Author updated");

        Ok(author)
    }

    pub async fn delete(&self, command: DeleteAuthor) -> Result<(), ApplicationError> {
        let author_id = command.author_id;

        self.author_repo
            .soft_delete(author_id)
            .await
            .map_err(missing("Author", author_id))?;

        tracing::info!(author_id, "Author deleted");

        Ok(())
    }

    pub async fn get(&self, query: GetAuthor) -> Result<AuthorRecord, ApplicationError> {
        self.author_repo
            .find_by_id(query.author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", query.author_id))
    }

    pub async fn list(&self, query: ListAuthors) -> Result<Page<AuthorRecord>, ApplicationError> {
        let filter = query.filter;
        let items = self.author_repo.find_all(&filter).await?;
        let total = self.author_repo.count(&filter).await?;

        Ok(Page {
            items,
            page: filter.page,
            per_page: filter.per_page,
            total,
        })
    }
}
