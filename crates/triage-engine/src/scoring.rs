//! 生命体征评分
//!
//! 从满分 100 开始按类别扣分。每个类别只取最严重的一档
//! （危急 → 异常 → 轻度偏离，命中即停），类别之间相互独立。

use triage_core::{HealthStatus, ScoreResult, VitalsRecord};

/// 满分
const FULL_SCORE: i32 = 100;

/// 危急症状关键词，按顺序匹配，命中一次即停
const CRITICAL_SYMPTOMS: [&str; 5] = [
    "chest pain",
    "difficulty breathing",
    "severe headache",
    "loss of consciousness",
    "severe bleeding",
];

/// 需关注症状关键词
const CONCERNING_SYMPTOMS: [&str; 6] = ["dizziness", "nausea", "fever", "fatigue", "pain", "headache"];

const CRITICAL_SYMPTOM_DEDUCTION: i32 = 20;
const CONCERNING_SYMPTOM_DEDUCTION: i32 = 10;

/// 计算稳定性评分
pub fn score_vitals(record: &VitalsRecord) -> ScoreResult {
    let deductions = temperature_deduction(record.temperature)
        + heart_rate_deduction(record.heart_rate)
        + blood_pressure_deduction(record.bp_sys, record.bp_dia)
        + spo2_deduction(record.spo2)
        + age_deduction(record.age)
        + symptom_deduction(&record.symptoms);

    let score = (FULL_SCORE - deductions).max(0) as u32;
    let status = HealthStatus::from_score(score);

    tracing::debug!(score, %status, deductions, "vitals scored");

    ScoreResult { score, status }
}

fn temperature_deduction(temperature: f64) -> i32 {
    if temperature < 35.0 || temperature > 40.0 {
        30
    } else if temperature < 36.0 || temperature > 38.5 {
        20
    } else if temperature < 36.5 || temperature > 37.5 {
        10
    } else {
        0
    }
}

fn heart_rate_deduction(heart_rate: i32) -> i32 {
    if heart_rate < 40 || heart_rate > 150 {
        25
    } else if heart_rate < 50 || heart_rate > 120 {
        10
    } else if heart_rate < 55 || heart_rate > 105 {
        5
    } else {
        0
    }
}

fn blood_pressure_deduction(sys: i32, dia: i32) -> i32 {
    if sys < 80 || sys > 180 || dia < 50 || dia > 110 {
        20
    } else if sys < 90 || sys > 160 || dia < 60 || dia > 100 {
        10
    } else if sys < 95 || sys > 150 || dia < 65 || dia > 95 {
        5
    } else {
        0
    }
}

fn spo2_deduction(spo2: i32) -> i32 {
    if spo2 < 90 {
        30
    } else if spo2 < 95 {
        15
    } else if spo2 < 97 {
        5
    } else {
        0
    }
}

fn age_deduction(age: i32) -> i32 {
    if age > 65 {
        5
    } else if age < 18 {
        3
    } else {
        0
    }
}

fn symptom_deduction(symptoms: &str) -> i32 {
    let text = symptoms.to_lowercase();
    let mut deduction = 0;

    if CRITICAL_SYMPTOMS.iter().any(|phrase| text.contains(phrase)) {
        deduction += CRITICAL_SYMPTOM_DEDUCTION;
    }
    if CONCERNING_SYMPTOMS.iter().any(|phrase| text.contains(phrase)) {
        deduction += CONCERNING_SYMPTOM_DEDUCTION;
    }

    deduction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> VitalsRecord {
        VitalsRecord {
            age: 30,
            temperature: 37.0,
            heart_rate: 75,
            bp_sys: 120,
            bp_dia: 80,
            spo2: 98,
            symptoms: String::new(),
        }
    }

    #[test]
    fn test_healthy_adult_is_stable() {
        let result = score_vitals(&healthy());
        assert_eq!(result.score, 100);
        assert_eq!(result.status, HealthStatus::Stable);
    }

    #[test]
    fn test_elderly_with_chest_pain() {
        let record = VitalsRecord {
            age: 70,
            temperature: 39.0,
            heart_rate: 130,
            bp_sys: 170,
            bp_dia: 105,
            spo2: 92,
            symptoms: "chest pain".to_string(),
        };

        // 体温 -20, 心率 -10, 血压 -10, 血氧 -15, 年龄 -5, 危急症状 -20,
        // "chest pain" 同时包含需关注关键词 "pain" -10
        let result = score_vitals(&record);
        assert_eq!(result.score, 10);
        assert_eq!(result.status, HealthStatus::Emergency);
    }

    #[test]
    fn test_threshold_edges_are_exclusive() {
        let mut record = healthy();

        record.temperature = 35.0;
        assert_eq!(score_vitals(&record).score, 80);
        record.temperature = 34.9;
        assert_eq!(score_vitals(&record).score, 70);
        record.temperature = 37.5;
        assert_eq!(score_vitals(&record).score, 100);
        record.temperature = 40.0;
        assert_eq!(score_vitals(&record).score, 80);

        let mut record = healthy();
        record.heart_rate = 150;
        assert_eq!(score_vitals(&record).score, 90);
        record.heart_rate = 151;
        assert_eq!(score_vitals(&record).score, 75);

        let mut record = healthy();
        record.spo2 = 97;
        assert_eq!(score_vitals(&record).score, 100);
        record.spo2 = 90;
        assert_eq!(score_vitals(&record).score, 85);
        record.spo2 = 89;
        assert_eq!(score_vitals(&record).score, 70);
    }

    #[test]
    fn test_only_worst_tier_fires_per_category() {
        let mut record = healthy();
        // 收缩压危急，舒张压仅轻度偏离：只扣危急档
        record.bp_sys = 185;
        record.bp_dia = 97;
        assert_eq!(score_vitals(&record).score, 80);
    }

    #[test]
    fn test_age_adjustments() {
        let mut record = healthy();
        record.age = 66;
        assert_eq!(score_vitals(&record).score, 95);
        record.age = 65;
        assert_eq!(score_vitals(&record).score, 100);
        record.age = 17;
        assert_eq!(score_vitals(&record).score, 97);
        record.age = 18;
        assert_eq!(score_vitals(&record).score, 100);
    }

    #[test]
    fn test_symptom_scans_are_independent() {
        let mut record = healthy();

        // 两个危急关键词只扣一次；"pain" 同时命中需关注列表
        record.symptoms = "Severe Bleeding and CHEST PAIN".to_string();
        assert_eq!(score_vitals(&record).score, 70);

        record.symptoms = "mild dizziness, nausea".to_string();
        assert_eq!(score_vitals(&record).score, 90);

        record.symptoms = "difficulty breathing".to_string();
        assert_eq!(score_vitals(&record).score, 80);
    }

    #[test]
    fn test_score_is_clamped_at_zero() {
        let record = VitalsRecord {
            age: 80,
            temperature: 30.0,
            heart_rate: 20,
            bp_sys: 60,
            bp_dia: 30,
            spo2: 70,
            symptoms: "loss of consciousness, fatigue".to_string(),
        };
        let result = score_vitals(&record);
        assert_eq!(result.score, 0);
        assert_eq!(result.status, HealthStatus::Emergency);
    }

    #[test]
    fn test_defaults_score_as_emergency() {
        // 缺省的生命体征全部为 0
        let result = score_vitals(&VitalsRecord::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.status, HealthStatus::Emergency);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut record = healthy();
        record.temperature = 38.7;
        record.symptoms = "headache".to_string();

        let first = score_vitals(&record);
        let second = score_vitals(&record);
        assert_eq!(first, second);
        assert_eq!(first.status, HealthStatus::Monitor);
        assert_eq!(first.score, 70);
    }

    #[test]
    fn test_score_range_and_status_consistency() {
        for temperature in [30.0, 35.5, 36.2, 37.0, 38.0, 39.0, 41.0] {
            for heart_rate in [30, 45, 52, 80, 110, 130, 160] {
                for spo2 in [85, 93, 96, 99] {
                    let record = VitalsRecord {
                        age: 40,
                        temperature,
                        heart_rate,
                        bp_sys: 120,
                        bp_dia: 80,
                        spo2,
                        symptoms: "fatigue".to_string(),
                    };
                    let result = score_vitals(&record);
                    assert!(result.score <= 100);
                    assert_eq!(result.status, HealthStatus::from_score(result.score));
                }
            }
        }
    }
}
