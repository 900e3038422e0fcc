use crate::domain::{Category, ClassifiedPrompt};

/// A category and the substrings that select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub triggers: &'static [&'static str],
}

impl CategoryRule {
    /// `normalized` must already be lowercase.
    fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t))
    }
}

/// Priority order: the first rule with a matching trigger wins.
pub const DEFAULT_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::ConceptMentor,
        triggers: &["explain", "what is", "how does"],
    },
    CategoryRule {
        category: Category::QuizMaster,
        triggers: &["quiz", "test me", "practice"],
    },
    CategoryRule {
        category: Category::MemoryArchitect,
        triggers: &["summarize", "review", "notes"],
    },
];

/// Category used when no rule matches.
pub const FALLBACK_CATEGORY: Category = Category::ChillPartner;

/// Keyword-based classifier mapping a free-text topic to a [`ClassifiedPrompt`].
///
/// Matching is case-insensitive substring search over an ordered rule list;
/// the generated instructions keep the topic's original casing. Every input
/// classifies, at worst to [`FALLBACK_CATEGORY`]. Callers reject blank topics
/// before getting here.
pub struct PromptClassifier {
    rules: Vec<CategoryRule>,
}

impl Default for PromptClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptClassifier {
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn category_for(&self, topic: &str) -> Category {
        let normalized = topic.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.category)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    pub fn classify(&self, topic: &str) -> ClassifiedPrompt {
        ClassifiedPrompt::new(self.category_for(topic), topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IDENTITY;

    fn classify(topic: &str) -> ClassifiedPrompt {
        PromptClassifier::new().classify(topic)
    }

    #[test]
    fn concept_triggers_select_concept_mentor() {
        for topic in [
            "Explain gravity",
            "so WHAT IS entropy",
            "How does TCP congestion control work?",
            "can you explain this",
        ] {
            let prompt = classify(topic);
            assert_eq!(prompt.category(), Category::ConceptMentor, "topic: {topic}");
            assert_eq!(prompt.temperature(), 0.4);
        }
    }

    #[test]
    fn quiz_triggers_select_quiz_master() {
        for topic in ["Quiz me on basic chemistry", "test me on verbs", "PRACTICE fractions"] {
            let prompt = classify(topic);
            assert_eq!(prompt.category(), Category::QuizMaster, "topic: {topic}");
            assert_eq!(prompt.temperature(), 0.4);
        }
    }

    #[test]
    fn review_triggers_select_memory_architect() {
        for topic in ["Summarize the main points of World War 2", "review cell biology", "my notes"] {
            let prompt = classify(topic);
            assert_eq!(prompt.category(), Category::MemoryArchitect, "topic: {topic}");
            assert_eq!(prompt.temperature(), 0.3);
        }
    }

    #[test]
    fn unmatched_topics_fall_back_to_chill_partner() {
        for topic in ["hi", "I'm tired of studying", "photosynthesis", ""] {
            let prompt = classify(topic);
            assert_eq!(prompt.category(), Category::ChillPartner, "topic: {topic}");
            assert_eq!(prompt.temperature(), 0.7);
        }
    }

    #[test]
    fn concept_mentor_wins_over_quiz_master() {
        assert_eq!(
            classify("quiz me, then explain the answers").category(),
            Category::ConceptMentor
        );
    }

    #[test]
    fn quiz_master_wins_over_memory_architect() {
        assert_eq!(
            classify("review my notes and quiz me").category(),
            Category::QuizMaster
        );
    }

    #[test]
    fn concept_mentor_wins_over_memory_architect() {
        assert_eq!(
            classify("summarize and explain the french revolution").category(),
            Category::ConceptMentor
        );
    }

    #[test]
    fn rule_order_is_fixed() {
        let order: Vec<Category> = DEFAULT_RULES.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                Category::ConceptMentor,
                Category::QuizMaster,
                Category::MemoryArchitect
            ]
        );
    }

    #[test]
    fn custom_rule_order_changes_priority() {
        let reversed: Vec<CategoryRule> = DEFAULT_RULES.iter().rev().copied().collect();
        let classifier = PromptClassifier::with_rules(reversed);
        assert_eq!(
            classifier.category_for("explain, then quiz me"),
            Category::QuizMaster
        );
    }

    #[test]
    fn instruction_keeps_original_case() {
        let prompt = classify("Explain The Krebs Cycle");
        assert!(prompt.task_instruction().contains("\"Explain The Krebs Cycle\""));
    }

    #[test]
    fn every_category_carries_identity() {
        for topic in ["explain x", "quiz x", "notes x", "x"] {
            assert!(classify(topic).system_role().starts_with(IDENTITY));
        }
    }

    #[test]
    fn headed_categories_name_their_only_header() {
        let concept = classify("explain gravity");
        assert!(concept.task_instruction().contains("'## 🎓 Deep Dive' as your ONLY header"));

        let quiz = classify("quiz me on gravity");
        assert!(quiz.task_instruction().contains("'## 📝 Quick Quiz' as your ONLY header"));
        assert!(quiz.task_instruction().contains("5 multiple-choice questions"));

        let review = classify("summarize gravity");
        assert!(review.task_instruction().contains("'## 🧠 Reviewer' as your ONLY header"));
    }

    #[test]
    fn chill_partner_has_no_header_and_caps_length() {
        let prompt = classify("hello there");
        assert!(!prompt.task_instruction().contains("##"));
        assert!(prompt.task_instruction().contains("Max 3 sentences"));
    }
}
