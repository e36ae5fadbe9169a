//! SQLite Publisher Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::columns::{
    parse_optional_timestamp, parse_timestamp, push_live_filter, push_page, read_error,
};
use super::DbPool;
use crate::application::ports::{
    ListFilter, PublisherFields, PublisherRecord, PublisherRepositoryPort, RepositoryError,
};

const SELECT_PUBLISHER: &str =
    "SELECT id, name, city, created_at, updated_at, deleted_at FROM publishers";

/// SQLite Publisher Repository
pub struct SqlitePublisherRepository {
    pool: DbPool,
}

impl SqlitePublisherRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PublisherRow {
    id: i64,
    name: String,
    city: Option<String>,
    created_at: String,
    updated_at: String,
    deleted_at: Option<String>,
}

impl TryFrom<PublisherRow> for PublisherRecord {
    type Error = RepositoryError;

    fn try_from(row: PublisherRow) -> Result<Self, Self::Error> {
        Ok(PublisherRecord {
            id: row.id,
            name: row.name,
            city: row.city,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            deleted_at: parse_optional_timestamp(row.deleted_at)?,
        })
    }
}

#[async_trait]
impl PublisherRepositoryPort for SqlitePublisherRepository {
    async fn create(&self, publisher: &PublisherFields) -> Result<PublisherRecord, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO publishers (name, city, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&publisher.name)
        .bind(&publisher.city)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(PublisherRecord {
            id: result.last_insert_rowid(),
            name: publisher.name.clone(),
            city: publisher.city.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PublisherRecord>, RepositoryError> {
        let row: Option<PublisherRow> = sqlx::query_as(&format!(
            "{} WHERE id = ? AND deleted_at IS NULL",
            SELECT_PUBLISHER
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        row.map(PublisherRecord::try_from).transpose()
    }

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<PublisherRecord>, RepositoryError> {
        let row: Option<PublisherRow> =
            sqlx::query_as(&format!("{} WHERE id = ?", SELECT_PUBLISHER))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?;

        row.map(PublisherRecord::try_from).transpose()
    }

    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<PublisherRecord>, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_PUBLISHER);
        push_live_filter(&mut builder, "name", filter);
        push_page(&mut builder, filter);

        let rows: Vec<PublisherRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(PublisherRecord::try_from).collect()
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM publishers");
        push_live_filter(&mut builder, "name", filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(count.max(0) as u64)
    }

    async fn update(
        &self,
        id: i64,
        publisher: &PublisherFields,
    ) -> Result<PublisherRecord, RepositoryError> {
        let result = sqlx::query(
            "UPDATE publishers SET name = ?, city = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&publisher.name)
        .bind(&publisher.city)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("publisher {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("publisher {}", id)))
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE publishers SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("publisher {}", id)));
        }

        Ok(())
    }
}
