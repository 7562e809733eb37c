//! 分诊问题库

use triage_core::{SymptomCategory, TriageQuestion};

const CHEST_PAIN_QUESTIONS: &[&str] = &[
    "Is the pain spreading to your arm, jaw, neck, or back?",
    "Are you sweating, nauseous, or short of breath?",
    "Did the pain start suddenly or feel like heavy pressure?",
];

const BREATHING_QUESTIONS: &[&str] = &[
    "Are your lips or fingertips turning blue or grey?",
    "Are you unable to speak in full sentences?",
    "Is the difficulty breathing getting worse quickly?",
];

const FEVER_QUESTIONS: &[&str] = &[
    "Is the temperature above 39.5°C (103°F)?",
    "Is there a stiff neck, a rash, or confusion?",
    "Has the fever lasted more than three days?",
];

const ACCIDENT_QUESTIONS: &[&str] = &[
    "Is there heavy bleeding that does not stop with pressure?",
    "Was there a blow to the head or any loss of consciousness?",
    "Is there a suspected broken bone or inability to move a limb?",
];

const UNCONSCIOUS_QUESTIONS: &[&str] = &[
    "Is the person not responding to voice or touch?",
    "Is the person breathing abnormally or not at all?",
    "Did the person have a seizure or hit their head?",
];

const OTHER_QUESTIONS: &[&str] = &[
    "Are your symptoms getting rapidly worse?",
    "Are you in severe pain?",
    "Do you feel faint, confused, or unable to stay awake?",
];

/// 按症状类别返回分诊问题（最多三个）
pub fn questions_for(category: SymptomCategory) -> Vec<TriageQuestion> {
    let texts = match category {
        SymptomCategory::ChestPain => CHEST_PAIN_QUESTIONS,
        SymptomCategory::Breathing => BREATHING_QUESTIONS,
        SymptomCategory::Fever => FEVER_QUESTIONS,
        SymptomCategory::Accident => ACCIDENT_QUESTIONS,
        SymptomCategory::Unconscious => UNCONSCIOUS_QUESTIONS,
        SymptomCategory::Other => OTHER_QUESTIONS,
    };

    texts
        .iter()
        .map(|text| TriageQuestion { text: (*text).to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_most_three_questions() {
        for category in SymptomCategory::ALL {
            let questions = questions_for(category);
            assert!(!questions.is_empty());
            assert!(questions.len() <= 3, "{} has {} questions", category, questions.len());
        }
    }

    #[test]
    fn test_unknown_category_falls_back_to_other() {
        let unknown = questions_for(SymptomCategory::parse("unknown_category"));
        let other = questions_for(SymptomCategory::Other);
        assert_eq!(unknown, other);
    }

    #[test]
    fn test_question_order_is_fixed() {
        let questions = questions_for(SymptomCategory::ChestPain);
        assert_eq!(questions[0].text, CHEST_PAIN_QUESTIONS[0]);
        assert_eq!(questions[2].text, CHEST_PAIN_QUESTIONS[2]);
    }
}
