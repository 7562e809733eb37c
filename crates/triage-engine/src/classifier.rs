//! 紧急程度分级
//!
//! 根据症状类别、分诊问题回答以及照护者观察判定严重程度，
//! 并给出对应的处置指引。

use triage_core::{
    Answer, CaretakerObservation, Severity, SeverityResult, SymptomCategory, TriageAnswer,
};

/// 通用稳定指引，也是所有未定义指引集合的兜底
pub const STABLE_INSTRUCTIONS: &[&str] = &[
    "Stay calm and rest in a comfortable position.",
    "Keep monitoring the symptoms and note any changes.",
    "Drink water and avoid strenuous activity.",
    "Contact a doctor or visit a clinic if symptoms persist or worsen.",
];

const STABLE_KEY: &str = "stable";

/// 指引集合表，只读
const INSTRUCTION_SETS: &[(&str, &[&str])] = &[
    (
        "chest_pain_emergency",
        &[
            "Call emergency services immediately.",
            "Stop all activity and sit down in a half-sitting position.",
            "Chew one adult aspirin (300 mg) if you are not allergic.",
            "Loosen tight clothing and unlock the front door.",
            "If the person becomes unresponsive and is not breathing, start CPR.",
        ],
    ),
    (
        "chest_pain_warning",
        &[
            "Stop what you are doing and rest.",
            "Do not drive yourself; arrange for someone to take you to a doctor.",
            "Call emergency services if the pain spreads, worsens, or lasts more than 5 minutes.",
        ],
    ),
    (
        "breathing_emergency",
        &[
            "Call emergency services immediately.",
            "Sit upright and lean slightly forward.",
            "Use a prescribed inhaler if available.",
            "Loosen tight clothing and open a window for fresh air.",
            "Stay with the person and keep them calm.",
        ],
    ),
    (
        "breathing_warning",
        &[
            "Sit upright and take slow, steady breaths.",
            "Use a prescribed inhaler if available.",
            "Seek medical advice today; call emergency services if breathing gets worse.",
        ],
    ),
    (
        "accident_emergency",
        &[
            "Call emergency services immediately.",
            "Apply firm pressure to any bleeding with a clean cloth.",
            "Do not move the person if a head, neck, or back injury is possible.",
            "Keep the person warm and still until help arrives.",
        ],
    ),
    (
        "accident_warning",
        &[
            "Clean minor wounds and cover them with a sterile dressing.",
            "Apply ice wrapped in a cloth to reduce swelling.",
            "Visit a clinic or urgent care for an examination.",
        ],
    ),
    (
        "unconscious_emergency",
        &[
            "Call emergency services immediately.",
            "Check whether the person is breathing.",
            "If breathing, place them in the recovery position.",
            "If not breathing, start CPR: 30 chest compressions then 2 rescue breaths.",
            "Do not give anything by mouth and stay with the person.",
        ],
    ),
    (
        "fever_emergency",
        &[
            "Seek emergency medical care now.",
            "Give fever-reducing medicine such as paracetamol if not already taken.",
            "Remove extra layers of clothing and keep the room cool.",
            "Keep the person drinking small sips of water.",
        ],
    ),
    (STABLE_KEY, STABLE_INSTRUCTIONS),
];

/// 按名称查找指引集合，返回实际采用的集合名称和内容；未定义的名称回退到稳定指引
pub fn instructions_for(key: &str) -> (&'static str, &'static [&'static str]) {
    INSTRUCTION_SETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(name, steps)| (*name, *steps))
        .unwrap_or((STABLE_KEY, STABLE_INSTRUCTIONS))
}

/// 判定严重程度
pub fn classify(
    category: SymptomCategory,
    answers: &[TriageAnswer],
    is_caretaker: bool,
    observation: Option<&CaretakerObservation>,
) -> SeverityResult {
    let yes_count = answers.iter().filter(|a| a.answer == Answer::Yes).count();

    let (severity, key) = if is_caretaker && observation.is_some_and(|o| o.is_unconscious()) {
        tracing::warn!("Caretaker reports patient unconscious, escalating to emergency");
        (Severity::Emergency, "unconscious_emergency".to_string())
    } else {
        base_classification(category, yes_count)
    };

    let (instruction_set, steps) = instructions_for(&key);
    if instruction_set != key {
        tracing::debug!("No instruction set '{}', falling back to '{}'", key, instruction_set);
    }

    tracing::debug!(
        category = category.as_str(),
        yes_count,
        ?severity,
        instruction_set,
        "triage classified"
    );

    SeverityResult {
        severity,
        instructions: steps.iter().map(|s| (*s).to_string()).collect(),
        instruction_set: instruction_set.to_string(),
    }
}

/// 不考虑照护者观察时的分级
fn base_classification(category: SymptomCategory, yes_count: usize) -> (Severity, String) {
    if category.is_critical() {
        if yes_count >= 1 {
            (Severity::Emergency, format!("{}_emergency", category.as_str()))
        } else {
            (Severity::Warning, format!("{}_warning", category.as_str()))
        }
    } else if category == SymptomCategory::Fever {
        match yes_count {
            0 => (Severity::Stable, STABLE_KEY.to_string()),
            1 => (Severity::Warning, STABLE_KEY.to_string()),
            _ => (Severity::Emergency, "fever_emergency".to_string()),
        }
    } else if yes_count >= 2 {
        (Severity::Warning, STABLE_KEY.to_string())
    } else {
        (Severity::Stable, STABLE_KEY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::Consciousness;

    fn steps(key: &str) -> Vec<String> {
        instructions_for(key).1.iter().map(|s| s.to_string()).collect()
    }

    fn unconscious() -> CaretakerObservation {
        CaretakerObservation {
            conscious: Some(Consciousness::No),
            age: None,
        }
    }

    #[test]
    fn test_chest_pain_single_yes_is_emergency() {
        let answers = [TriageAnswer::yes(), TriageAnswer::no(), TriageAnswer::no()];
        let result = classify(SymptomCategory::ChestPain, &answers, false, None);

        assert_eq!(result.severity, Severity::Emergency);
        assert_eq!(result.instruction_set, "chest_pain_emergency");
        assert_eq!(result.instructions, steps("chest_pain_emergency"));
    }

    #[test]
    fn test_critical_category_without_yes_is_warning() {
        let answers = [TriageAnswer::no(), TriageAnswer::no(), TriageAnswer::no()];

        let result = classify(SymptomCategory::Breathing, &answers, false, None);
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.instruction_set, "breathing_warning");

        // unconscious 没有专属的 warning 指引，回退到 stable
        let result = classify(SymptomCategory::Unconscious, &answers, false, None);
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.instruction_set, "stable");
        assert_eq!(result.instructions, steps("stable"));
    }

    #[test]
    fn test_fever_buckets() {
        let one_yes = [TriageAnswer::yes(), TriageAnswer::no(), TriageAnswer::no()];
        let result = classify(SymptomCategory::Fever, &one_yes, false, None);
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.instructions, steps("stable"));

        let two_yes = [TriageAnswer::yes(), TriageAnswer::yes(), TriageAnswer::no()];
        let result = classify(SymptomCategory::Fever, &two_yes, false, None);
        assert_eq!(result.severity, Severity::Emergency);
        assert_eq!(result.instruction_set, "fever_emergency");

        let result = classify(SymptomCategory::Fever, &[], false, None);
        assert_eq!(result.severity, Severity::Stable);
        assert_eq!(result.instruction_set, "stable");
    }

    #[test]
    fn test_other_category() {
        let one_yes = [TriageAnswer::yes(), TriageAnswer::no()];
        let result = classify(SymptomCategory::Other, &one_yes, false, None);
        assert_eq!(result.severity, Severity::Stable);

        let two_yes = [TriageAnswer::yes(), TriageAnswer::yes(), TriageAnswer::yes()];
        let result = classify(SymptomCategory::Other, &two_yes, false, None);
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.instruction_set, "stable");
    }

    #[test]
    fn test_caretaker_unconscious_overrides() {
        let observation = unconscious();
        let result = classify(SymptomCategory::Other, &[], true, Some(&observation));

        assert_eq!(result.severity, Severity::Emergency);
        assert_eq!(result.instruction_set, "unconscious_emergency");
        assert_eq!(result.instructions, steps("unconscious_emergency"));
    }

    #[test]
    fn test_observation_ignored_without_caretaker_flag() {
        let observation = unconscious();
        let result = classify(SymptomCategory::Other, &[], false, Some(&observation));
        assert_eq!(result.severity, Severity::Stable);

        let conscious = CaretakerObservation {
            conscious: Some(Consciousness::Yes),
            age: Some(40),
        };
        let result = classify(SymptomCategory::Fever, &[], true, Some(&conscious));
        assert_eq!(result.severity, Severity::Stable);
    }

    #[test]
    fn test_unknown_instruction_key_falls_back() {
        let (key, steps) = instructions_for("other_warning");
        assert_eq!(key, "stable");
        assert_eq!(steps, STABLE_INSTRUCTIONS);
    }

    #[test]
    fn test_answers_deserialized_from_request() {
        let answers: Vec<TriageAnswer> = serde_json::from_str(
            r#"[{"question": "a", "answer": "no"}, {"question": "b", "answer": "maybe"}]"#,
        )
        .unwrap();
        let result = classify(SymptomCategory::Accident, &answers, false, None);
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.instruction_set, "accident_warning");
    }
}
