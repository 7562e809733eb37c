//! # 分诊Web模块
//!
//! 基于axum的HTTP接口层，负责请求路由、JSON编解码、错误响应映射
//! 以及静态文件服务。决策逻辑全部委托给 `triage-engine`。

pub mod error;
pub mod handlers;
pub mod server;
pub mod static_files;

pub use error::{ApiError, ApiResult};
pub use server::{AppState, WebServer};
