//! SQLite Person Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::columns::{
    format_date, parse_date, parse_gender, parse_optional_timestamp, parse_timestamp,
    push_live_filter, push_page, read_error, write_error,
};
use super::DbPool;
use crate::application::ports::{
    ListFilter, PersonFields, PersonRecord, PersonRepositoryPort, RepositoryError,
};

const SELECT_PERSON: &str = "SELECT id, fullname, gender, birth_date, account_id, created_at, updated_at, deleted_at FROM persons";

/// SQLite Person Repository
pub struct SqlitePersonRepository {
    pool: DbPool,
}

impl SqlitePersonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PersonRow {
    id: i64,
    fullname: String,
    gender: Option<String>,
    birth_date: Option<String>,
    account_id: Option<i64>,
    created_at: String,
    updated_at: String,
    deleted_at: Option<String>,
}

impl TryFrom<PersonRow> for PersonRecord {
    type Error = RepositoryError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        Ok(PersonRecord {
            id: row.id,
            fullname: row.fullname,
            gender: parse_gender(row.gender)?,
            birth_date: parse_date(row.birth_date)?,
            account_id: row.account_id,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            deleted_at: parse_optional_timestamp(row.deleted_at)?,
        })
    }
}

fn duplicate_account(person: &PersonFields) -> String {
    match person.account_id {
        Some(account_id) => format!("person for account {}", account_id),
        None => "person".to_string(),
    }
}

#[async_trait]
impl PersonRepositoryPort for SqlitePersonRepository {
    async fn create(&self, person: &PersonFields) -> Result<PersonRecord, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO persons (fullname, gender, birth_date, account_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&person.fullname)
        .bind(person.gender.map(|g| g.as_str()))
        .bind(format_date(person.birth_date))
        .bind(person.account_id)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &duplicate_account(person)))?;

        Ok(PersonRecord {
            id: result.last_insert_rowid(),
            fullname: person.fullname.clone(),
            gender: person.gender,
            birth_date: person.birth_date,
            account_id: person.account_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PersonRecord>, RepositoryError> {
        let row: Option<PersonRow> =
            sqlx::query_as(&format!("{} WHERE id = ? AND deleted_at IS NULL", SELECT_PERSON))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?;

        row.map(PersonRecord::try_from).transpose()
    }

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<PersonRecord>, RepositoryError> {
        let row: Option<PersonRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_PERSON))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.map(PersonRecord::try_from).transpose()
    }

    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<PersonRecord>, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_PERSON);
        push_live_filter(&mut builder, "fullname", filter);
        push_page(&mut builder, filter);

        let rows: Vec<PersonRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(PersonRecord::try_from).collect()
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM persons");
        push_live_filter(&mut builder, "fullname", filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(count.max(0) as u64)
    }

    async fn update(&self, id: i64, person: &PersonFields) -> Result<PersonRecord, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE persons
            SET fullname = ?, gender = ?, birth_date = ?, account_id = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&person.fullname)
        .bind(person.gender.map(|g| g.as_str()))
        .bind(format_date(person.birth_date))
        .bind(person.account_id)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &duplicate_account(person)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("person {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("person {}", id)))
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE persons SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("person {}", id)));
        }

        Ok(())
    }
}
