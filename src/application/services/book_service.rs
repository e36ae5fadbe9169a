//! Book Service

use std::sync::Arc;

use crate::application::commands::{CreateBook, DeleteBook, UpdateBook};
use crate::application::error::{missing, ApplicationError, FieldResultExt};
use crate::application::ports::{
    AuthorRepositoryPort, BookFields, BookRecord, BookRepositoryPort, PublisherRepositoryPort,
};
use crate::application::queries::{GetBook, ListBooks, Page};
use crate::domain::catalog::{check_subtitle, Title};

/// 图书服务
///
/// 写入前校验引用的作者和出版社仍然存在（未被软删除）
pub struct BookService {
    book_repo: Arc<dyn BookRepositoryPort>,
    author_repo: Arc<dyn AuthorRepositoryPort>,
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
}

impl BookService {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        author_repo: Arc<dyn AuthorRepositoryPort>,
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            author_repo,
            publisher_repo,
        }
    }

    async fn validate(
        &self,
        title: String,
        subtitle: Option<String>,
        author_id: i64,
        publisher_id: i64,
    ) -> Result<BookFields, ApplicationError> {
        let title = Title::new(title).field("title")?;
        let subtitle = check_subtitle(subtitle).field("subtitle")?;

        if self.author_repo.find_by_id(author_id).await?.is_none() {
            return Err(ApplicationError::invalid_field(
                "author_id",
                format!("作者不存在: {}", author_id),
            ));
        }
        if self.publisher_repo.find_by_id(publisher_id).await?.is_none() {
            return Err(ApplicationError::invalid_field(
                "publisher_id",
                format!("出版社不存在: {}", publisher_id),
            ));
        }

        Ok(BookFields {
            title: title.into_inner(),
            subtitle,
            author_id,
            publisher_id,
        })
    }

    pub async fn create(&self, command: CreateBook) -> Result<BookRecord, ApplicationError> {
        let fields = self
            .validate(
                command.title,
                command.subtitle,
                command.author_id,
                command.publisher_id,
            )
            .await?;
        let book = self.book_repo.create(&fields).await?;

        tracing::info!(
            book_id = book.id,
            title = %book.title,
            author_id = book.author_id,
            publisher_id = book.publisher_id,
            "Book created"
        );

        Ok(book)
    }

    pub async fn update(&self, command: UpdateBook) -> Result<BookRecord, ApplicationError> {
        let book_id = command.book_id;

        // 先确认图书本身存在，避免对已删除图书报引用错误
        if self.book_repo.find_by_id(book_id).await?.is_none() {
            return Err(ApplicationError::not_found("Book", book_id));
        }

        let fields = self
            .validate(
                command.title,
                command.subtitle,
                command.author_id,
                command.publisher_id,
            )
            .await?;

        let book = self
            .book_repo
            .update(book_id, &fields)
            .await
            .map_err(missing("Book", book_id))?;

        tracing::info!(book_id, "Book updated");

        Ok(book)
    }

    pub async fn delete(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let book_id = command.book_id;

        self.book_repo
            .soft_delete(book_id)
            .await
            .map_err(missing("Book", book_id))?;

        tracing::info!(book_id, "Book deleted");

        Ok(())
    }

    pub async fn get(&self, query: GetBook) -> Result<BookRecord, ApplicationError> {
        self.book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))
    }

    pub async fn list(&self, query: ListBooks) -> Result<Page<BookRecord>, ApplicationError> {
        let filter = query.filter;
        let items = self.book_repo.find_all(&filter).await?;
        let total = self.book_repo.count(&filter).await?;

        Ok(Page {
            items,
            page: filter.page,
            per_page: filter.per_page,
            total,
        })
    }
}
