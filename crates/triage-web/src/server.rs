//! Web服务器

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use triage_core::Result;
use triage_database::DatabasePool;
use triage_integration::FacilityProvider;

use crate::handlers::{
    advice, api_root, check_health, classify_emergency, detect_symptom, find_hospitals,
    get_triage_questions, health, health_history,
};
use crate::static_files::{create_static_service, index};

/// 处理器共享状态
#[derive(Clone)]
pub struct AppState {
    pub db: DatabasePool,
    pub facilities: Arc<dyn FacilityProvider>,
    /// 历史记录单次查询上限
    pub history_limit: i64,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        db: DatabasePool,
        facilities: Arc<dyn FacilityProvider>,
        history_limit: i64,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            db,
            facilities,
            history_limit: history_limit.max(1),
            static_dir: static_dir.into(),
        }
    }
}

pub struct WebServer {
    addr: SocketAddr,
    app: Router,
}

impl WebServer {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        let app = create_app(state);
        Self { addr, app }
    }

    /// 启动服务，收到 Ctrl-C 后优雅退出
    pub async fn run(self) -> Result<()> {
        info!("Starting web server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// 构建路由
pub fn create_app(state: AppState) -> Router {
    let static_service = create_static_service(&state.static_dir);

    Router::new()
        // 首页和服务信息
        .route("/", get(index))
        .route("/api", get(api_root))
        .route("/health", get(health))

        // 生命体征评分流程
        .route("/check_health", post(check_health))
        .route("/health_history", get(health_history))
        .route("/advice/:status", get(advice))

        // 引导式分诊流程
        .route("/get_triage_questions", post(get_triage_questions))
        .route("/classify_emergency", post(classify_emergency))
        .route("/detect_symptom", post(detect_symptom))

        // 附近医疗机构
        .route("/find_hospitals", post(find_hospitals))

        // 静态文件服务
        .nest_service("/static", static_service)

        // 全局中间件
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
