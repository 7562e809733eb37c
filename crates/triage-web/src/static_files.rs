//! 静态文件服务模块

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use std::path::Path;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::handlers::api_root;
use crate::server::AppState;

const INDEX_FILE: &str = "index.html";

/// 创建静态文件服务
pub fn create_static_service(root_dir: &Path) -> ServeDir {
    ServeDir::new(root_dir).append_index_html_on_directories(true)
}

/// 首页：静态目录中存在 index.html 时返回页面，否则返回API说明
pub async fn index(State(state): State<AppState>) -> Response {
    let index_path = state.static_dir.join(INDEX_FILE);

    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            debug!("No index page at {}: {}", index_path.display(), e);
            api_root().await.into_response()
        }
    }
}
