//! SQLite Author Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::columns::{
    format_date, parse_date, parse_gender, parse_optional_timestamp, parse_timestamp,
    push_live_filter, push_page, read_error,
};
use super::DbPool;
use crate::application::ports::{
    AuthorFields, AuthorRecord, AuthorRepositoryPort, ListFilter, RepositoryError,
};

const SELECT_AUTHOR: &str =
    "SELECT id, fullname, gender, birth_date, created_at, updated_at, deleted_at FROM authors";

/// SQLite Author Repository
pub struct SqliteAuthorRepository {
    pool: DbPool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    id: i64,
    fullname: String,
    gender: Option<String>,
    birth_date: Option<String>,
    created_at: String,
    updated_at: String,
    deleted_at: Option<String>,
}

impl TryFrom<AuthorRow> for AuthorRecord {
    type Error = RepositoryError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(AuthorRecord {
            id: row.id,
            fullname: row.fullname,
            gender: parse_gender(row.gender)?,
            birth_date: parse_date(row.birth_date)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            deleted_at: parse_optional_timestamp(row.deleted_at)?,
        })
    }
}

#[async_trait]
impl AuthorRepositoryPort for SqliteAuthorRepository {
    async fn create(&self, author: &AuthorFields) -> Result<AuthorRecord, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO authors (fullname, gender, birth_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&author.fullname)
        .bind(author.gender.map(|g| g.as_str()))
        .bind(format_date(author.birth_date))
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(AuthorRecord {
            id: result.last_insert_rowid(),
            fullname: author.fullname.clone(),
            gender: author.gender,
            birth_date: author.birth_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AuthorRecord>, RepositoryError> {
        let row: Option<AuthorRow> =
            sqlx::query_as(&format!("{} WHERE id = ? AND deleted_at IS NULL", SELECT_AUTHOR))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?;

        row.map(AuthorRecord::try_from).transpose()
    }

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<AuthorRecord>, RepositoryError> {
        let row: Option<AuthorRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_AUTHOR))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.map(AuthorRecord::try_from).transpose()
    }

    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<AuthorRecord>, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_AUTHOR);
        push_live_filter(&mut builder, "fullname", filter);
        push_page(&mut builder, filter);

        let rows: Vec<AuthorRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(AuthorRecord::try_from).collect()
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM authors");
        push_live_filter(&mut builder, "fullname", filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(count.max(0) as u64)
    }

    async fn update(&self, id: i64, author: &AuthorFields) -> Result<AuthorRecord, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET fullname = ?, gender = ?, birth_date = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&author.fullname)
        .bind(author.gender.map(|g| g.as_str()))
        .bind(format_date(author.birth_date))
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("author {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("author {}", id)))
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE authors SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("author {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use crate::infrastructure::persistence::sqlite::open_in_memory;
    use chrono::NaiveDate;

    fn fields(fullname: &str) -> AuthorFields {
        AuthorFields {
            fullname: fullname.to_string(),
            gender: Some(Gender::Male),
            birth_date: NaiveDate::from_ymd_opt(1892, 1, 3),
        }
    }

    #[tokio::test]
    async fn test_update_sets_fields_and_timestamp() {
        let repo = SqliteAuthorRepository::new(open_in_memory().await.unwrap());
        let created = repo.create(&fields("J. R. R. Tolkien")).await.unwrap();

        let mut changed = fields("John Ronald Reuel Tolkien");
        changed.gender = None;
        let updated = repo.update(created.id, &changed).await.unwrap();

        assert_eq!(updated.fields(), changed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row() {
        let repo = SqliteAuthorRepository::new(open_in_memory().await.unwrap());
        let created = repo.create(&fields("Ursula K. Le Guin")).await.unwrap();

        repo.soft_delete(created.id).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        let stored = repo
            .find_by_id_including_deleted(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.fullname, "Ursula K. Le Guin");
        assert!(stored.deleted_at.is_some());
        assert_eq!(repo.count(&ListFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = SqliteAuthorRepository::new(open_in_memory().await.unwrap());
        repo.create(&fields("Anna_Smith")).await.unwrap();
        repo.create(&fields("AnnaXSmith")).await.unwrap();

        let items = repo.find_all(&ListFilter::search("a_s")).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].fullname, "Anna_Smith");

        let items = repo.find_all(&ListFilter::search("%")).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_author_not_found() {
        let repo = SqliteAuthorRepository::new(open_in_memory().await.unwrap());
        let err = repo.update(42, &fields("Nobody Here")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
