//! Role vocabulary resource: per-role wording, emphasis and forbidden terms.
//!
//! Loaded once at process start (see `rhythmcard-config`) and shared
//! read-only by every request afterwards.

use crate::profile::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a rhythm question is asking the reader to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionIntent {
    Completion,
    Goal,
    Default,
}

impl QuestionIntent {
    /// Simple keyword match on the question text.
    pub fn detect(question: &str) -> Self {
        let lower = question.to_lowercase();
        if ["finish", "complete", "done", "wrap up"]
            .iter()
            .any(|k| lower.contains(k))
        {
            QuestionIntent::Completion
        } else if ["goal", "aim", "achieve", "toward"]
            .iter()
            .any(|k| lower.contains(k))
        {
            QuestionIntent::Goal
        } else {
            QuestionIntent::Default
        }
    }
}

/// Replacement questions, one per intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTemplates {
    #[serde(default)]
    pub completion: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub default: String,
}

impl QuestionTemplates {
    pub fn for_intent(&self, intent: QuestionIntent) -> &str {
        let chosen = match intent {
            QuestionIntent::Completion => &self.completion,
            QuestionIntent::Goal => &self.goal,
            QuestionIntent::Default => &self.default,
        };
        if chosen.trim().is_empty() {
            &self.default
        } else {
            chosen
        }
    }
}

/// The vocabulary resource for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleVocabulary {
    pub role: Role,

    /// Source phrase → role phrase.
    #[serde(default)]
    pub vocabulary_map: BTreeMap<String, String>,

    #[serde(default)]
    pub emphasis_areas: Vec<String>,

    #[serde(default)]
    pub de_emphasis_areas: Vec<String>,

    #[serde(default)]
    pub tone_preference: String,

    #[serde(default)]
    pub time_focus: String,

    #[serde(default)]
    pub example_patterns: Vec<String>,

    /// Role-specific terms that must never reach this role's readers.
    #[serde(default)]
    pub forbidden_terms: Vec<String>,

    /// Ordered by importance; the first three drive question re-selection.
    #[serde(default)]
    pub action_keywords: Vec<String>,

    #[serde(default)]
    pub question_templates: QuestionTemplates,
}

impl RoleVocabulary {
    /// An empty vocabulary: substitutes nothing, forbids nothing.
    pub fn empty(role: Role) -> Self {
        Self {
            role,
            vocabulary_map: BTreeMap::new(),
            emphasis_areas: vec![],
            de_emphasis_areas: vec![],
            tone_preference: String::new(),
            time_focus: String::new(),
            example_patterns: vec![],
            forbidden_terms: vec![],
            action_keywords: vec![],
            question_templates: QuestionTemplates::default(),
        }
    }

    /// Substitution entries, longest source phrase first.
    ///
    /// Ties are broken alphabetically so the order never depends on
    /// map iteration details.
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .vocabulary_map
            .iter()
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// The top three action keywords.
    pub fn top_action_keywords(&self) -> &[String] {
        let n = self.action_keywords.len().min(3);
        &self.action_keywords[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_detection() {
        assert_eq!(
            QuestionIntent::detect("What can you finish today?"),
            QuestionIntent::Completion
        );
        assert_eq!(
            QuestionIntent::detect("Which goal matters most?"),
            QuestionIntent::Goal
        );
        assert_eq!(
            QuestionIntent::detect("How do you feel?"),
            QuestionIntent::Default
        );
    }

    #[test]
    fn empty_template_falls_back_to_default() {
        let templates = QuestionTemplates {
            completion: String::new(),
            goal: "goal?".into(),
            default: "default?".into(),
        };
        assert_eq!(templates.for_intent(QuestionIntent::Completion), "default?");
        assert_eq!(templates.for_intent(QuestionIntent::Goal), "goal?");
    }

    #[test]
    fn sorted_entries_longest_first() {
        let mut vocab = RoleVocabulary::empty(Role::Student);
        vocab.vocabulary_map.insert("work".into(), "study".into());
        vocab.vocabulary_map.insert("workday".into(), "school day".into());
        vocab.vocabulary_map.insert("team".into(), "class".into());
        let keys: Vec<&str> = vocab.sorted_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["workday", "team", "work"]);
    }

    #[test]
    fn top_action_keywords_caps_at_three() {
        let mut vocab = RoleVocabulary::empty(Role::Freelancer);
        vocab.action_keywords = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        assert_eq!(vocab.top_action_keywords().len(), 3);
        vocab.action_keywords.truncate(1);
        assert_eq!(vocab.top_action_keywords().len(), 1);
    }
}
