//! 数据库查询操作

use crate::connection::DatabasePool;
use crate::models::DbHealthRecord;
use triage_core::{HealthHistoryEntry, Result, ScoreResult, TriageError, VitalsRecord};

/// 数据库查询操作接口
pub struct DatabaseQueries<'a> {
    pool: &'a DatabasePool,
}

impl<'a> DatabaseQueries<'a> {
    pub fn new(pool: &'a DatabasePool) -> Self {
        Self { pool }
    }

    /// 创建数据库表
    pub async fn create_tables(&self) -> Result<()> {
        let pool = self.pool.pool();

        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS health_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                age INTEGER NOT NULL,
                temperature REAL NOT NULL,
                heart_rate INTEGER NOT NULL,
                bp_sys INTEGER NOT NULL,
                bp_dia INTEGER NOT NULL,
                spo2 INTEGER NOT NULL,
                symptoms TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL,
                score INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
        "#).execute(pool).await.map_err(|e| TriageError::Database(e.to_string()))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_health_records_created_at ON health_records(created_at)")
            .execute(pool)
            .await
            .map_err(|e| TriageError::Database(e.to_string()))?;

        tracing::info!("Database tables created successfully");
        Ok(())
    }

    // ========== 健康记录相关操作 ==========

    /// 追加一条健康检查记录，返回记录ID
    pub async fn insert_health_record(&self, record: &VitalsRecord, result: &ScoreResult) -> Result<i64> {
        let pool = self.pool.pool();

        let id = sqlx::query(r#"
            INSERT INTO health_records
                (age, temperature, heart_rate, bp_sys, bp_dia, spo2, symptoms, status, score, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#)
        .bind(record.age)
        .bind(record.temperature)
        .bind(record.heart_rate)
        .bind(record.bp_sys)
        .bind(record.bp_dia)
        .bind(record.spo2)
        .bind(&record.symptoms)
        .bind(result.status.as_str())
        .bind(result.score as i64)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await
        .map(|done| done.last_insert_rowid())
        .map_err(|e| TriageError::Database(e.to_string()))?;

        tracing::debug!("Inserted health record {} ({})", id, result.status);
        Ok(id)
    }

    /// 按时间倒序获取最近的健康记录
    pub async fn recent_health_records(&self, limit: i64) -> Result<Vec<HealthHistoryEntry>> {
        let pool = self.pool.pool();

        let results = sqlx::query_as::<_, DbHealthRecord>(
            "SELECT * FROM health_records ORDER BY created_at DESC, id DESC LIMIT ?"
        )
        .bind(limit.max(0))
        .fetch_all(pool)
        .await
        .map_err(|e| TriageError::Database(e.to_string()))?;

        Ok(results.into_iter().map(HealthHistoryEntry::from).collect())
    }

    /// 统计记录总数
    pub async fn count_health_records(&self) -> Result<i64> {
        let pool = self.pool.pool();

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM health_records")
            .fetch_one(pool)
            .await
            .map_err(|e| TriageError::Database(e.to_string()))
    }
}
