//! 从自由文本（如语音转写）中识别症状类别

use triage_core::SymptomCategory;

/// 按顺序匹配，第一个命中的类别生效
const CATEGORY_KEYWORDS: &[(SymptomCategory, &[&str])] = &[
    (
        SymptomCategory::ChestPain,
        &["chest pain", "heart pain", "chest hurt", "chest pressure"],
    ),
    (
        SymptomCategory::Breathing,
        &["breath", "breathing", "cant breathe", "difficulty breathing", "shortness of breath"],
    ),
    (SymptomCategory::Fever, &["fever", "temperature", "hot", "burning up"]),
    (
        SymptomCategory::Accident,
        &["accident", "injury", "hurt", "fell", "crash", "bleeding"],
    ),
    (
        SymptomCategory::Unconscious,
        &["unconscious", "passed out", "not responding", "unresponsive", "fainted"],
    ),
];

/// 识别症状类别，无命中时返回 `other`
pub fn detect_category(text: &str) -> SymptomCategory {
    let text = text.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(SymptomCategory::Other)
}
