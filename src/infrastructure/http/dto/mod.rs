//! Data Transfer Objects
//!
//! 请求 DTO 负责去除首尾空白并转换为命令，响应 DTO 从记录构造

mod account;
mod author;
mod book;
mod common;
mod person;
mod publisher;

pub use account::*;
pub use author::*;
pub use book::*;
pub use common::{ApiResponse, Empty, ListQuery, PageResponse};
pub use person::*;
pub use publisher::*;
