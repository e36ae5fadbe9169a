//! Identity Context - 身份限界上下文
//!
//! 职责:
//! - 账号凭据（用户名、密码）
//! - 人员资料与账号的一对一关联

mod value_objects;

pub use value_objects::{Password, Username};
