//! 数据库模型

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use triage_core::models::*;

/// 数据库健康记录表
#[derive(Debug, FromRow)]
pub struct DbHealthRecord {
    pub id: i64,
    pub age: i64,
    pub temperature: f64,
    pub heart_rate: i64,
    pub bp_sys: i64,
    pub bp_dia: i64,
    pub spo2: i64,
    pub symptoms: String,
    pub status: String, // 存储为字符串，转换为HealthStatus枚举
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DbHealthRecord> for HealthHistoryEntry {
    fn from(db_record: DbHealthRecord) -> Self {
        HealthHistoryEntry {
            id: db_record.id,
            record: VitalsRecord {
                age: db_record.age as i32,
                temperature: db_record.temperature,
                heart_rate: db_record.heart_rate as i32,
                bp_sys: db_record.bp_sys as i32,
                bp_dia: db_record.bp_dia as i32,
                spo2: db_record.spo2 as i32,
                symptoms: db_record.symptoms,
            },
            // 无法识别的状态按紧急处理
            status: HealthStatus::from_label(&db_record.status).unwrap_or(HealthStatus::Emergency),
            score: db_record.score.clamp(0, 100) as u32,
            date: db_record.created_at,
        }
    }
}
