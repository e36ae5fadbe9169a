//! Publisher Commands

/// 创建出版社命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePublisher {
    pub name: String,
    pub city: Option<String>,
}

/// 更新出版社命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePublisher {
    pub publisher_id: i64,
    pub name: String,
    pub city: Option<String>,
}

/// 删除出版社命令
#[derive(Debug, Clone)]
pub struct DeletePublisher {
    pub publisher_id: i64,
}
