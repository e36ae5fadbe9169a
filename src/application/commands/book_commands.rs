//! Book Commands

/// 创建图书命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBook {
    pub title: String,
    pub subtitle: Option<String>,
    pub author_id: i64,
    pub publisher_id: i64,
}

/// 更新图书命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBook {
    pub book_id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub author_id: i64,
    pub publisher_id: i64,
}

/// 删除图书命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: i64,
}
