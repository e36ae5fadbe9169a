//! Catalog Queries - 作者 / 出版社 / 图书

use crate::application::ports::ListFilter;

/// 获取作者详情查询
#[derive(Debug, Clone)]
pub struct GetAuthor {
    pub author_id: i64,
}

/// 分页列出作者查询
#[derive(Debug, Clone, Default)]
pub struct ListAuthors {
    pub filter: ListFilter,
}

/// 获取出版社详情查询
#[derive(Debug, Clone)]
pub struct GetPublisher {
    pub publisher_id: i64,
}

/// 分页列出出版社查询
#[derive(Debug, Clone, Default)]
pub struct ListPublishers {
    pub filter: ListFilter,
}

/// 获取图书详情查询
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: i64,
}

/// 分页列出图书查询
#[derive(Debug, Clone, Default)]
pub struct ListBooks {
    pub filter: ListFilter,
}
