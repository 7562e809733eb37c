//! 核心数据模型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};
use crate::utils::{lenient_f64, lenient_i32, lenient_text};

/// 未提供年龄时使用的默认值
pub const DEFAULT_AGE: i32 = 30;

/// 自报生命体征记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawVitalsRecord")]
pub struct VitalsRecord {
    pub age: i32,
    pub temperature: f64, // 体温 (°C)
    pub heart_rate: i32,  // 心率 (bpm)
    pub bp_sys: i32,      // 收缩压 (mmHg)
    pub bp_dia: i32,      // 舒张压 (mmHg)
    pub spo2: i32,        // 血氧饱和度 (%)
    pub symptoms: String, // 症状自由文本
}

impl Default for VitalsRecord {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            temperature: 0.0,
            heart_rate: 0,
            bp_sys: 0,
            bp_dia: 0,
            spo2: 0,
            symptoms: String::new(),
        }
    }
}

/// 请求体中的原始字段，缺失或无法识别的值按默认值处理
#[derive(Debug, Default, Deserialize)]
struct RawVitalsRecord {
    #[serde(default, deserialize_with = "lenient_i32")]
    age: Option<i32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i32")]
    heart_rate: Option<i32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    bp_sys: Option<i32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    bp_dia: Option<i32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    spo2: Option<i32>,
    #[serde(default, deserialize_with = "lenient_text")]
    symptoms: Option<String>,
}

impl From<RawVitalsRecord> for VitalsRecord {
    fn from(raw: RawVitalsRecord) -> Self {
        Self {
            age: raw.age.unwrap_or(DEFAULT_AGE),
            temperature: raw.temperature.unwrap_or_default(),
            heart_rate: raw.heart_rate.unwrap_or_default(),
            bp_sys: raw.bp_sys.unwrap_or_default(),
            bp_dia: raw.bp_dia.unwrap_or_default(),
            spo2: raw.spo2.unwrap_or_default(),
            symptoms: raw.symptoms.unwrap_or_default(),
        }
    }
}

/// 健康状态（数值评分流程）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    Stable,    // 稳定
    Monitor,   // 需观察
    Emergency, // 紧急
}

impl HealthStatus {
    /// 由最终评分推导状态
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => HealthStatus::Stable,
            60..=84 => HealthStatus::Monitor,
            _ => HealthStatus::Emergency,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Stable => "Stable",
            HealthStatus::Monitor => "Monitor",
            HealthStatus::Emergency => "Emergency",
        }
    }

    /// 按标签解析，忽略大小写
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "stable" => Some(HealthStatus::Stable),
            "monitor" => Some(HealthStatus::Monitor),
            "emergency" => Some(HealthStatus::Emergency),
            _ => None,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 评分结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u32,
    pub status: HealthStatus,
}

/// 症状类别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SymptomCategory {
    ChestPain,
    Breathing,
    Fever,
    Accident,
    Unconscious,
    Other,
}

impl SymptomCategory {
    pub const ALL: [SymptomCategory; 6] = [
        SymptomCategory::ChestPain,
        SymptomCategory::Breathing,
        SymptomCategory::Fever,
        SymptomCategory::Accident,
        SymptomCategory::Unconscious,
        SymptomCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomCategory::ChestPain => "chest_pain",
            SymptomCategory::Breathing => "breathing",
            SymptomCategory::Fever => "fever",
            SymptomCategory::Accident => "accident",
            SymptomCategory::Unconscious => "unconscious",
            SymptomCategory::Other => "other",
        }
    }

    /// 解析类别名称，无法识别的名称归入 `other`
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "chest_pain" => SymptomCategory::ChestPain,
            "breathing" => SymptomCategory::Breathing,
            "fever" => SymptomCategory::Fever,
            "accident" => SymptomCategory::Accident,
            "unconscious" => SymptomCategory::Unconscious,
            _ => SymptomCategory::Other,
        }
    }

    /// 任一“是”即判定为紧急的类别
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            SymptomCategory::ChestPain
                | SymptomCategory::Breathing
                | SymptomCategory::Unconscious
                | SymptomCategory::Accident
        )
    }
}

impl Default for SymptomCategory {
    fn default() -> Self {
        SymptomCategory::Other
    }
}

impl From<String> for SymptomCategory {
    fn from(value: String) -> Self {
        SymptomCategory::parse(&value)
    }
}

impl std::fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分诊问题
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageQuestion {
    pub text: String,
}

/// 是/否回答，除 "yes" 以外的取值一律视为否
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Answer {
    Yes,
    No,
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        if value == "yes" {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// 分诊回答（按位置对应问题）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageAnswer {
    #[serde(default)]
    pub question: Option<String>,
    pub answer: Answer,
}

impl TriageAnswer {
    pub fn yes() -> Self {
        Self { question: None, answer: Answer::Yes }
    }

    pub fn no() -> Self {
        Self { question: None, answer: Answer::No }
    }
}

/// 意识状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Consciousness {
    Yes,
    No,
    Unknown,
}

impl From<String> for Consciousness {
    fn from(value: String) -> Self {
        match value.as_str() {
            "yes" => Consciousness::Yes,
            "no" => Consciousness::No,
            _ => Consciousness::Unknown,
        }
    }
}

/// 照护者代为上报时的观察记录
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaretakerObservation {
    #[serde(default)]
    pub conscious: Option<Consciousness>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub age: Option<i32>,
}

impl CaretakerObservation {
    pub fn is_unconscious(&self) -> bool {
        self.conscious == Some(Consciousness::No)
    }
}

/// 严重程度（引导式分诊流程）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Stable,    // 稳定
    Warning,   // 需关注
    Emergency, // 紧急
}

/// 分诊分级结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityResult {
    pub severity: Severity,
    pub instructions: Vec<String>,
    pub instruction_set: String, // 实际采用的指引集合名称
}

/// 健康记录历史条目
#[derive(Debug, Clone, Serialize)]
pub struct HealthHistoryEntry {
    pub id: i64,
    #[serde(flatten)]
    pub record: VitalsRecord,
    pub status: HealthStatus,
    pub score: u32,
    pub date: DateTime<Utc>,
}

/// 地理坐标
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// 校验坐标范围
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TriageError::Validation(format!(
                "latitude out of range: {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TriageError::Validation(format!(
                "longitude out of range: {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// 附近医疗机构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facility {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: Option<f64>,
    pub distance: String, // 展示用距离，如 "0.8 km"
    pub distance_km: f64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub amenity: Option<String>,
    pub emergency: Option<String>,
    pub opening_hours: Option<String>,
    pub is_open: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitals_defaults() {
        let record: VitalsRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, VitalsRecord::default());
        assert_eq!(record.age, DEFAULT_AGE);
        assert_eq!(record.symptoms, "");
    }

    #[test]
    fn test_vitals_lenient_fields() {
        let record: VitalsRecord = serde_json::from_str(
            r#"{"age": "70", "temperature": 38, "heart_rate": 88.0, "bp_sys": null, "symptoms": 0}"#,
        )
        .unwrap();
        assert_eq!(record.age, 70);
        assert_eq!(record.temperature, 38.0);
        assert_eq!(record.heart_rate, 88);
        assert_eq!(record.bp_sys, 0);
        assert_eq!(record.symptoms, "");
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(HealthStatus::from_score(100), HealthStatus::Stable);
        assert_eq!(HealthStatus::from_score(85), HealthStatus::Stable);
        assert_eq!(HealthStatus::from_score(84), HealthStatus::Monitor);
        assert_eq!(HealthStatus::from_score(60), HealthStatus::Monitor);
        assert_eq!(HealthStatus::from_score(59), HealthStatus::Emergency);
        assert_eq!(HealthStatus::from_score(0), HealthStatus::Emergency);
    }

    #[test]
    fn test_symptom_category_parse() {
        assert_eq!(SymptomCategory::parse("chest_pain"), SymptomCategory::ChestPain);
        assert_eq!(SymptomCategory::parse("unknown_category"), SymptomCategory::Other);

        let category: SymptomCategory = serde_json::from_str(r#""breathing""#).unwrap();
        assert_eq!(category, SymptomCategory::Breathing);
        assert_eq!(serde_json::to_string(&SymptomCategory::ChestPain).unwrap(), r#""chest_pain""#);
    }

    #[test]
    fn test_answer_only_yes_counts() {
        let answers: Vec<TriageAnswer> = serde_json::from_str(
            r#"[{"question": "q1", "answer": "yes"}, {"answer": "no"}, {"answer": "YES"}]"#,
        )
        .unwrap();
        assert_eq!(answers[0].answer, Answer::Yes);
        assert_eq!(answers[1].answer, Answer::No);
        assert_eq!(answers[2].answer, Answer::No);
    }

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(51.5, -0.12).validate().is_ok());
        assert!(GeoPoint::new(91.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).validate().is_err());
    }
}
