//! Catalog Context - 馆藏限界上下文
//!
//! 职责:
//! - 作者、出版社、图书的字段规则

mod value_objects;

pub use value_objects::{check_city, check_subtitle, PublisherName, Title};
