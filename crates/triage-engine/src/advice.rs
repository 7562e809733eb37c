//! 健康建议

use triage_core::HealthStatus;

/// 无法识别状态时的建议
pub const FALLBACK_ADVICE: [&str; 1] = ["Please consult a healthcare professional."];

const STABLE_ADVICE: [&str; 4] = [
    "Your vital signs appear normal. Continue monitoring your health.",
    "Maintain regular exercise and a balanced diet.",
    "Stay hydrated and get adequate rest.",
    "Consider regular health checkups.",
];

const MONITOR_ADVICE: [&str; 5] = [
    "Your condition requires monitoring. Watch for any changes.",
    "Rest and avoid strenuous activities.",
    "Stay hydrated and monitor your symptoms.",
    "Consider consulting a healthcare provider if symptoms persist.",
    "Keep track of your vital signs regularly.",
];

const EMERGENCY_ADVICE: [&str; 5] = [
    "IMMEDIATE MEDICAL ATTENTION REQUIRED",
    "Please seek emergency medical care immediately.",
    "Do not delay - contact emergency services or visit the nearest hospital.",
    "If possible, have someone accompany you.",
    "Keep your emergency contacts informed.",
];

/// 按健康状态返回建议
pub fn advice_for(status: HealthStatus) -> &'static [&'static str] {
    match status {
        HealthStatus::Stable => &STABLE_ADVICE,
        HealthStatus::Monitor => &MONITOR_ADVICE,
        HealthStatus::Emergency => &EMERGENCY_ADVICE,
    }
}

/// 按状态标签返回建议，未知标签返回兜底建议
pub fn advice_for_label(label: &str) -> &'static [&'static str] {
    match HealthStatus::from_label(label) {
        Some(status) => advice_for(status),
        None => {
            tracing::debug!("Unknown status label '{}', using fallback advice", label);
            &FALLBACK_ADVICE
        }
    }
}
