//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Identity Context: 账号与人员
//! - Catalog Context: 作者、出版社、图书

pub mod catalog;
pub mod identity;

// 人员与作者共用的资料字段
mod profile;

pub use profile::{check_birth_date, Fullname, Gender, FULLNAME_MAX_CHARS, FULLNAME_MIN_CHARS};
