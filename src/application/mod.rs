//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、PasswordHasher、TokenService）
//! - commands: 写操作输入
//! - queries: 读操作输入与分页结果
//! - services: 每个实体一个服务
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

pub use error::ApplicationError;

pub use ports::{
    AccountRecord, AccountRepositoryPort, AuthorFields, AuthorRecord, AuthorRepositoryPort,
    BookFields, BookRecord, BookRepositoryPort, CredentialError, IssuedToken, ListFilter,
    NewAccount, PasswordHasherPort, PersonFields, PersonRecord, PersonRepositoryPort,
    PublisherFields, PublisherRecord, PublisherRepositoryPort, RepositoryError, TokenClaims,
    TokenServicePort,
};

pub use queries::Page;

pub use services::{
    AccountService, AdminBootstrap, AuthorService, BookService, LoginResult, PersonService, PublisherService,
};
