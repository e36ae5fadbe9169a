//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）
//!
//! 所有实体都是软删除：`deleted_at` 非空的行保留在库中，
//! 但对 `find_by_id` / `find_all` / `count` / `update` 不可见。

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::domain::Gender;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// 列表过滤
// ============================================================================

/// 默认每页条数
pub const DEFAULT_PER_PAGE: u32 = 20;
/// 每页最大条数
pub const MAX_PER_PAGE: u32 = 100;

/// 列表查询条件
///
/// - `q`: 对展示字段做大小写不敏感的子串匹配（字面量，不支持通配符）
/// - `page`: 从 1 开始
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub q: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            q: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ListFilter {
    /// 规范化输入：空白 `q` 视为未设置，页码和每页条数夹到合法范围
    pub fn new(q: Option<String>, page: Option<u32>, per_page: Option<u32>) -> Self {
        let q = q
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            q,
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn search(q: impl Into<String>) -> Self {
        Self::new(Some(q.into()), None, None)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }
}

// ============================================================================
// Account Repository
// ============================================================================

/// 账号实体（用于持久化）
///
/// `password_hash` 为 PHC 格式字符串，永远不保存明文
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 新账号
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
}

/// Account Repository Port
#[async_trait]
pub trait AccountRepositoryPort: Send + Sync {
    /// 创建账号，用户名重复时返回 `Duplicate`
    async fn create(&self, account: &NewAccount) -> Result<AccountRecord, RepositoryError>;

    /// 根据 ID 查找账号
    async fn find_by_id(&self, id: i64) -> Result<Option<AccountRecord>, RepositoryError>;

    /// 根据 ID 查找账号（包括已软删除）
    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<AccountRecord>, RepositoryError>;

    /// 根据用户名查找账号
    async fn find_by_username(&self, username: &str)
        -> Result<Option<AccountRecord>, RepositoryError>;

    /// 根据用户名查找账号（包括已软删除），用户名唯一约束覆盖所有行
    async fn find_by_username_including_deleted(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, RepositoryError>;

    /// 分页查询账号（按用户名过滤）
    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<AccountRecord>, RepositoryError>;

    /// 统计匹配的账号数
    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError>;

    /// 更新密码哈希
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), RepositoryError>;

    /// 软删除账号
    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// 恢复已软删除的账号，账号不存在或未删除时返回 `NotFound`
    async fn restore(&self, id: i64) -> Result<AccountRecord, RepositoryError>;
}

// ============================================================================
// Person Repository
// ============================================================================

/// 人员实体（用于持久化）
#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub id: i64,
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 人员可写字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFields {
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

impl PersonRecord {
    pub fn fields(&self) -> PersonFields {
        PersonFields {
            fullname: self.fullname.clone(),
            gender: self.gender,
            birth_date: self.birth_date,
            account_id: self.account_id,
        }
    }
}

/// Person Repository Port
#[async_trait]
pub trait PersonRepositoryPort: Send + Sync {
    /// 创建人员，account_id 重复时返回 `Duplicate`
    async fn create(&self, person: &PersonFields) -> Result<PersonRecord, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PersonRecord>, RepositoryError>;

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<PersonRecord>, RepositoryError>;

    /// 分页查询人员（按姓名过滤）
    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<PersonRecord>, RepositoryError>;

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError>;

    /// 更新人员，不存在或已删除时返回 `NotFound`
    async fn update(&self, id: i64, person: &PersonFields) -> Result<PersonRecord, RepositoryError>;

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Author Repository
// ============================================================================

/// 作者实体（用于持久化）
#[derive(Debug, Clone)]
pub struct AuthorRecord {
    pub id: i64,
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 作者可写字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFields {
    pub fullname: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
}

impl AuthorRecord {
    pub fn fields(&self) -> AuthorFields {
        AuthorFields {
            fullname: self.fullname.clone(),
            gender: self.gender,
            birth_date: self.birth_date,
        }
    }
}

/// Author Repository Port
#[async_trait]
pub trait AuthorRepositoryPort: Send + Sync {
    async fn create(&self, author: &AuthorFields) -> Result<AuthorRecord, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<AuthorRecord>, RepositoryError>;

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<AuthorRecord>, RepositoryError>;

    /// 分页查询作者（按姓名过滤）
    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<AuthorRecord>, RepositoryError>;

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError>;

    async fn update(&self, id: i64, author: &AuthorFields) -> Result<AuthorRecord, RepositoryError>;

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Publisher Repository
// ============================================================================

/// 出版社实体（用于持久化）
#[derive(Debug, Clone)]
pub struct PublisherRecord {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 出版社可写字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherFields {
    pub name: String,
    pub city: Option<String>,
}

impl PublisherRecord {
    pub fn fields(&self) -> PublisherFields {
        PublisherFields {
            name: self.name.clone(),
            city: self.city.clone(),
        }
    }
}

/// Publisher Repository Port
#[async_trait]
pub trait PublisherRepositoryPort: Send + Sync {
    async fn create(&self, publisher: &PublisherFields) -> Result<PublisherRecord, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PublisherRecord>, RepositoryError>;

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<PublisherRecord>, RepositoryError>;

    /// 分页查询出版社（按名称过滤）
    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<PublisherRecord>, RepositoryError>;

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError>;

    async fn update(
        &self,
        id: i64,
        publisher: &PublisherFields,
    ) -> Result<PublisherRecord, RepositoryError>;

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Book Repository
// ============================================================================

/// 图书实体（用于持久化）
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub author_id: i64,
    pub publisher_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 图书可写字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub subtitle: Option<String>,
    pub author_id: i64,
    pub publisher_id: i64,
}

impl BookRecord {
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author_id: self.author_id,
            publisher_id: self.publisher_id,
        }
    }
}

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    async fn create(&self, book: &BookFields) -> Result<BookRecord, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepositoryError>;

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<BookRecord>, RepositoryError>;

    /// 分页查询图书（按书名过滤）
    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<BookRecord>, RepositoryError>;

    async fn count(&self, filter: &ListFilter) -> Result<u64, RepositoryError>;

    async fn update(&self, id: i64, book: &BookFields) -> Result<BookRecord, RepositoryError>;

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError>;
}
