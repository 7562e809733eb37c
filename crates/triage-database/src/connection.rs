//! 数据库连接管理

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use triage_core::{Result, TriageError};

/// 数据库连接池
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// 连接数据库，文件不存在时自动创建
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        if !url.starts_with("sqlite:") {
            return Err(TriageError::Config(format!("unsupported database url: {}", url)));
        }
        ensure_parent_dir(url)?;

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| TriageError::Config(format!("invalid database url '{}': {}", url, e)))?
            .create_if_missing(true);

        // 内存数据库每个连接各自独立，只能使用单连接且不回收
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options)
                .await?
        };

        tracing::info!("Connected to database: {}", url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// 为数据库文件创建所在目录
fn ensure_parent_dir(url: &str) -> Result<()> {
    if url.contains(":memory:") {
        return Ok(());
    }

    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if path.is_empty() {
        return Ok(());
    }
    let path = Path::new(path.split('?').next().unwrap_or(path));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            TriageError::Database(format!("failed to create {}: {}", parent.display(), e))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_memory() {
        let db = DatabasePool::connect("sqlite::memory:", 8).await.unwrap();
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(db.pool()).await.unwrap();
        assert_eq!(one, 1);
        db.close().await;
    }

    #[tokio::test]
    async fn test_invalid_url_is_config_error() {
        let err = DatabasePool::connect("postgres://localhost/db", 1).await.unwrap_err();
        assert!(matches!(err, TriageError::Config(_)));
    }
}
