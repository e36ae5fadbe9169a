//! Libris - 图书目录管理服务
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - identity: 用户名、密码
//! - catalog: 书名、出版社名称
//! - 人物资料: 姓名、性别、出生日期
//!
//! 应用层 (application/):
//! - Ports: Repository、PasswordHasher、TokenService
//! - Commands / Queries: 服务输入
//! - Services: 每个实体一个服务
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful JSON API + Bearer 认证
//! - Persistence: SQLite（软删除）
//! - Adapters: Argon2 密码哈希、JWT Token

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
