//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod credentials;
mod repositories;

pub use credentials::{
    CredentialError, IssuedToken, PasswordHasherPort, TokenClaims, TokenServicePort,
};
pub use repositories::{
    AccountRecord, AccountRepositoryPort, AuthorFields, AuthorRecord, AuthorRepositoryPort,
    BookFields, BookRecord, BookRepositoryPort, ListFilter, NewAccount, PersonFields,
    PersonRecord, PersonRepositoryPort, PublisherFields, PublisherRecord,
    PublisherRepositoryPort, RepositoryError, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
