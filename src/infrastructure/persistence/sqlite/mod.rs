//! SQLite Persistence - SQLite 数据库持久化实现

mod account_repo;
mod author_repo;
mod book_repo;
mod columns;
mod database;
mod person_repo;
mod publisher_repo;

pub use account_repo::*;
pub use author_repo::*;
pub use book_repo::*;
pub use database::*;
pub use person_repo::*;
pub use publisher_repo::*;
