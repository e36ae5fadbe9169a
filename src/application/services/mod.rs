//! 应用层 - 服务
//!
//! 每个实体一个服务：校验命令输入，委托给对应的 Repository

mod account_service;
mod author_service;
mod book_service;
mod person_service;
mod publisher_service;

pub use account_service::{AccountService, AdminBootstrap, LoginResult};
pub use author_service::AuthorService;
pub use book_service::BookService;
pub use person_service::PersonService;
pub use publisher_service::PublisherService;
