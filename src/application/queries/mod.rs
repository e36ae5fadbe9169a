//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：所有读操作的输入

mod catalog_queries;
mod identity_queries;

pub use catalog_queries::*;
pub use identity_queries::*;

/// 分页结果
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
