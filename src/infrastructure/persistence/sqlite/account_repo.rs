//! SQLite Account Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::columns::{
    parse_optional_timestamp, parse_timestamp, push_live_filter, push_page, read_error,
    write_error,
};
use super::DbPool;
use crate::application::ports::{
    AccountRecord, AccountRepositoryPort, ListFilter, NewAccount, RepositoryError,
};

const SELECT_ACCOUNT: &str =
    "SELECT id, username, password_hash, created_at, updated_at, deleted_at FROM accounts";

/// SQLite Account Repository
pub struct SqliteAccountRepository {
    pool: DbPool,
}

impl SqliteAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: String,
    updated_at: String,
    deleted_at: Option<String>,
}

impl TryFrom<AccountRow> for AccountRecord {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(AccountRecord {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            deleted_at: parse_optional_timestamp(row.deleted_at)?,
        })
    }
}

#[async_trait]
impl AccountRepositoryPort for SqliteAccountRepository {
    async fn create(&self, account: &NewAccount) -> Result<AccountRecord, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (username, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &format!("account username {}", account.username)))?;

        Ok(AccountRecord {
            id: result.last_insert_rowid(),
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AccountRecord>, RepositoryError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE id = ? AND deleted_at IS NULL", SELECT_ACCOUNT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<AccountRecord>, RepositoryError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_ACCOUNT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, RepositoryError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "{} WHERE username = ? AND deleted_at IS NULL",
            SELECT_ACCOUNT
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn find_by_username_including_deleted(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, RepositoryError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE username = ?", SELECT_ACCOUNT))
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<AccountRecord>, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_ACCOUNT);
        push_live_filter(&mut builder, "username", filter);
        push_page(&mut builder, filter);

        let rows: Vec<AccountRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(AccountRecord::try_from).collect()
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM accounts");
        push_live_filter(&mut builder, "username", filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(count.max(0) as u64)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(password_hash)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("account {}", id)));
        }

        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE accounts SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("account {}", id)));
        }

        Ok(())
    }

    async fn restore(&self, id: i64) -> Result<AccountRecord, RepositoryError> {
        let result = sqlx::query(
            "UPDATE accounts SET deleted_at = NULL, updated_at = ? WHERE id = ? AND deleted_at IS NOT NULL",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("deleted account {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("account {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::open_in_memory;

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password_hash: "$argon2id$v=19$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_username() {
        let repo = SqliteAccountRepository::new(open_in_memory().await.unwrap());
        let created = repo.create(&new_account("admin")).await.unwrap();

        let found = repo.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, created.password_hash);
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_even_after_delete() {
        let repo = SqliteAccountRepository::new(open_in_memory().await.unwrap());
        let created = repo.create(&new_account("admin")).await.unwrap();
        repo.soft_delete(created.id).await.unwrap();

        let err = repo.create(&new_account("admin")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_account() {
        let repo = SqliteAccountRepository::new(open_in_memory().await.unwrap());
        let created = repo.create(&new_account("reader")).await.unwrap();

        repo.soft_delete(created.id).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.find_by_username("reader").await.unwrap().is_none());
        let stored = repo
            .find_by_id_including_deleted(created.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.deleted_at.is_some());

        assert!(matches!(
            repo.soft_delete(created.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.update_password(created.id, "x").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_restore_deleted_account() {
        let repo = SqliteAccountRepository::new(open_in_memory().await.unwrap());
        let created = repo.create(&new_account("admin")).await.unwrap();

        assert!(matches!(
            repo.restore(created.id).await,
            Err(RepositoryError::NotFound(_))
        ));

        repo.soft_delete(created.id).await.unwrap();
        let deleted = repo
            .find_by_username_including_deleted("admin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(deleted.deleted_at.is_some());

        let restored = repo.restore(created.id).await.unwrap();
        assert!(restored.deleted_at.is_none());
        assert_eq!(restored.password_hash, created.password_hash);
        assert!(repo.find_by_username("admin").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_filters_by_username() {
        let repo = SqliteAccountRepository::new(open_in_memory().await.unwrap());
        repo.create(&new_account("alice")).await.unwrap();
        repo.create(&new_account("bob")).await.unwrap();

        let filter = ListFilter::search("ALI");
        let items = repo.find_all(&filter).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].username, "alice");
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
        assert_eq!(repo.count(&ListFilter::default()).await.unwrap(), 2);
    }
}
