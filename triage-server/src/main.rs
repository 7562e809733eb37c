//! 分诊服务主程序

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use triage_database::{DatabasePool, DatabaseQueries};
use triage_integration::{FacilityProvider, OverpassProvider, StaticFacilityProvider};
use triage_web::{AppState, WebServer};

use crate::config::AppConfig;

/// 分诊服务命令行参数
#[derive(Parser, Debug)]
#[command(name = "triage-server")]
#[command(about = "生命体征评分与引导式紧急分诊服务")]
struct Args {
    /// 监听主机
    #[arg(long)]
    host: Option<String>,

    /// 监听端口
    #[arg(short, long)]
    port: Option<u16>,

    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 日志级别
    #[arg(short, long)]
    log_level: Option<String>,

    /// 数据库连接字符串
    #[arg(short, long)]
    database_url: Option<String>,

    /// 静态页面目录
    #[arg(short, long)]
    static_dir: Option<String>,

    /// 不访问外部服务，附近机构使用内置示例数据
    #[arg(long)]
    offline: bool,
}

impl Args {
    /// 命令行参数覆盖配置
    fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = dir.clone();
        }
        if self.offline {
            config.facilities.enabled = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(config.logging.level.as_str())
        .init();

    info!("启动分诊服务...");
    match args.config.as_deref() {
        Some(path) => info!("配置文件: {}", path),
        None => info!("未指定配置文件，使用默认值和环境变量"),
    }
    info!("服务配置:");
    info!("  监听地址: {}:{}", config.server.host, config.server.port);
    info!("  数据库: {}", config.database.url);
    info!("  静态目录: {}", config.server.static_dir);

    // 连接数据库并建表
    let db = DatabasePool::connect(&config.database.url, config.database.max_connections)
        .await
        .context("数据库连接失败")?;
    DatabaseQueries::new(&db)
        .create_tables()
        .await
        .context("数据库初始化失败")?;

    // 附近机构查询源
    let facilities: Arc<dyn FacilityProvider> = if config.facilities.enabled {
        Arc::new(OverpassProvider::new(config.facilities.lookup())?)
    } else {
        warn!("附近机构查询已关闭，使用内置示例数据");
        Arc::new(StaticFacilityProvider::new(config.facilities.max_results))
    };
    info!("  机构查询源: {}", facilities.name());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!("无效的监听地址: {}:{}", config.server.host, config.server.port)
        })?;

    let state = AppState::new(
        db.clone(),
        facilities,
        config.database.history_limit,
        config.server.static_dir.clone(),
    );

    let server = WebServer::new(addr, state);
    if let Err(e) = server.run().await {
        error!("服务器运行失败: {}", e);
        db.close().await;
        return Err(e.into());
    }

    db.close().await;
    info!("分诊服务已停止");
    Ok(())
}
