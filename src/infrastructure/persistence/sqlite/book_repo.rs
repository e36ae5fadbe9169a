//! SQLite Book Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::columns::{
    parse_optional_timestamp, parse_timestamp, push_live_filter, push_page, read_error,
};
use super::DbPool;
use crate::application::ports::{
    BookFields, BookRecord, BookRepositoryPort, ListFilter, RepositoryError,
};

const SELECT_BOOK: &str = "SELECT id, title, subtitle, author_id, publisher_id, created_at, updated_at, deleted_at FROM books";

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: i64,
    title: String,
    subtitle: Option<String>,
    author_id: i64,
    publisher_id: i64,
    created_at: String,
    updated_at: String,
    deleted_at: Option<String>,
}

impl TryFrom<BookRow> for BookRecord {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(BookRecord {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            author_id: row.author_id,
            publisher_id: row.publisher_id,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            deleted_at: parse_optional_timestamp(row.deleted_at)?,
        })
    }
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn create(&self, book: &BookFields) -> Result<BookRecord, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO books (title, subtitle, author_id, publisher_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.subtitle)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(BookRecord {
            id: result.last_insert_rowid(),
            title: book.title.clone(),
            subtitle: book.subtitle.clone(),
            author_id: book.author_id,
            publisher_id: book.publisher_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("{} WHERE id = ? AND deleted_at IS NULL", SELECT_BOOK))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_BOOK))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<BookRecord>, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_BOOK);
        push_live_filter(&mut builder, "title", filter);
        push_page(&mut builder, filter);

        let rows: Vec<BookRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(BookRecord::try_from).collect()
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM books");
        push_live_filter(&mut builder, "title", filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(count.max(0) as u64)
    }

    async fn update(&self, id: i64, book: &BookFields) -> Result<BookRecord, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, subtitle = ?, author_id = ?, publisher_id = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&book.title)
        .bind(&book.subtitle)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("book {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("book {}", id)))
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE books SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("book {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AuthorFields, AuthorRepositoryPort, PublisherFields, PublisherRepositoryPort,
    };
    use crate::infrastructure::persistence::sqlite::{
        open_in_memory, SqliteAuthorRepository, SqlitePublisherRepository,
    };

    async fn setup() -> (SqliteBookRepository, i64, i64) {
        let pool = open_in_memory().await.unwrap();
        let author = SqliteAuthorRepository::new(pool.clone())
            .create(&AuthorFields {
                fullname: "Pramoedya Ananta Toer".into(),
                gender: None,
                birth_date: None,
            })
            .await
            .unwrap();
        let publisher = SqlitePublisherRepository::new(pool.clone())
            .create(&PublisherFields {
                name: "Hasta Mitra".into(),
                city: Some("Jakarta".into()),
            })
            .await
            .unwrap();

        (SqliteBookRepository::new(pool), author.id, publisher.id)
    }

    fn fields(title: &str, author_id: i64, publisher_id: i64) -> BookFields {
        BookFields {
            title: title.to_string(),
            subtitle: None,
            author_id,
            publisher_id,
        }
    }

    #[tokio::test]
    async fn test_create_find_and_search() {
        let (repo, author_id, publisher_id) = setup().await;
        repo.create(&fields("Bumi Manusia", author_id, publisher_id))
            .await
            .unwrap();
        repo.create(&fields("Anak Semua Bangsa", author_id, publisher_id))
            .await
            .unwrap();

        let filter = ListFilter::search("bumi");
        let items = repo.find_all(&filter).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Bumi Manusia");
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_foreign_key_enforced() {
        let (repo, author_id, _) = setup().await;
        let err = repo
            .create(&fields("Orphan", author_id, 999))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_twice_not_found() {
        let (repo, author_id, publisher_id) = setup().await;
        let created = repo
            .create(&fields("Jejak Langkah", author_id, publisher_id))
            .await
            .unwrap();

        repo.soft_delete(created.id).await.unwrap();
        let err = repo.soft_delete(created.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));

        let stored = repo
            .find_by_id_including_deleted(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.fields(), fields("Jejak Langkah", author_id, publisher_id));
    }
}
