//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：所有写操作的输入

mod account_commands;
mod author_commands;
mod book_commands;
mod person_commands;
mod publisher_commands;

pub use account_commands::*;
pub use author_commands::*;
pub use book_commands::*;
pub use person_commands::*;
pub use publisher_commands::*;
