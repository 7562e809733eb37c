//! # 健康记录数据库模块
//!
//! 负责健康检查记录的持久化，提供SQLite连接池以及追加写入和按时间倒序查询。

pub mod connection;
pub mod models;
pub mod queries;

// 重新导出主要类型
pub use connection::DatabasePool;
pub use models::*;
pub use queries::DatabaseQueries;
