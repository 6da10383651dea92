//! RoleTranslator: rewrite a page into one role's vocabulary and check it.
//!
//! Steps, in order:
//! 1. Phrase substitution over every user-facing string (page + extensions)
//! 2. Question re-selection when no action keyword survives
//! 3. Structural check: serialized key paths must match the input
//! 4. Forbidden-term sweep (role terms + global jargon)
//! 5. Length drift check on the flattened serialized form

use crate::phrase_map::PhraseMap;
use rhythmcard_core::text::{flattened_len, key_paths};
use rhythmcard_core::{Page, QuestionIntent, Result, Role, RoleVocabulary, TextFields};
use rhythmcard_safety::{Finding, SafetyPolicy, TermMatcher, log_findings};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Each issue costs this much alignment.
const ISSUE_PENALTY: f64 = 0.2;

/// A problem found while translating. Recorded, never repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslationIssue {
    StructureMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    ForbiddenTerm {
        term: String,
        excerpt: String,
    },
    LengthDrift {
        original: usize,
        translated: usize,
        drift: f64,
        limit: f64,
    },
    Serialization {
        message: String,
    },
}

impl fmt::Display for TranslationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationIssue::StructureMismatch {
                missing,
                unexpected,
            } => write!(
                f,
                "structure changed: missing [{}], unexpected [{}]",
                missing.join(", "),
                unexpected.join(", ")
            ),
            TranslationIssue::ForbiddenTerm { term, excerpt } => {
                write!(f, "forbidden term '{term}' in \"{excerpt}\"")
            }
            TranslationIssue::LengthDrift {
                original,
                translated,
                drift,
                limit,
            } => write!(
                f,
                "length drifted {:.0}% ({original} → {translated} chars), limit {:.0}%",
                drift * 100.0,
                limit * 100.0
            ),
            TranslationIssue::Serialization { message } => {
                write!(f, "could not serialize page: {message}")
            }
        }
    }
}

/// The translated page and everything the checks found.
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub page: Page,
    pub issues: Vec<TranslationIssue>,
    pub findings: Vec<Finding>,
    /// |translated − original| / original over flattened lengths.
    pub drift: f64,
    pub question_reselected: bool,
    pub alignment_score: f64,
}

impl TranslationOutcome {
    pub fn is_aligned(&self) -> bool {
        self.issues.is_empty()
    }
}

/// `max(0, 1 − 0.2 × issues)`.
pub fn alignment_score(issue_count: usize) -> f64 {
    (1.0 - ISSUE_PENALTY * issue_count as f64).max(0.0)
}

pub struct RoleTranslator {
    vocabulary: Arc<RoleVocabulary>,
    phrases: PhraseMap,
    policy: Arc<SafetyPolicy>,
    forbidden: TermMatcher,
    max_drift: f64,
}

impl RoleTranslator {
    pub fn new(
        vocabulary: Arc<RoleVocabulary>,
        policy: Arc<SafetyPolicy>,
        max_drift: f64,
    ) -> Result<Self> {
        let forbidden = policy.matcher_for(&vocabulary)?;
        Ok(Self {
            phrases: PhraseMap::from_vocabulary(&vocabulary),
            vocabulary,
            policy,
            forbidden,
            max_drift,
        })
    }

    pub fn role(&self) -> Role {
        self.vocabulary.role
    }

    pub fn vocabulary(&self) -> &RoleVocabulary {
        &self.vocabulary
    }

    /// Role forbidden terms merged with the global jargon list.
    pub fn forbidden_matcher(&self) -> &TermMatcher {
        &self.forbidden
    }

    pub fn translate_text(&self, text: &str) -> String {
        self.phrases.apply(text)
    }

    /// Translate every user-facing string of any text-bearing value.
    pub fn translate_fields<T: TextFields>(&self, value: &T) -> T {
        value.map_texts(&mut |s| self.phrases.apply(s))
    }

    pub fn translate_page(&self, page: &Page) -> TranslationOutcome {
        let mut translated = self.translate_fields(page);
        let (question, question_reselected) = self.reselect_question(
            &page.content.rhythm_question,
            std::mem::take(&mut translated.content.rhythm_question),
        );
        translated.content.rhythm_question = question;

        let mut issues = Vec::new();
        let drift = match self.compare_serialized(page, &translated, &mut issues) {
            Ok(drift) => drift,
            Err(e) => {
                issues.push(TranslationIssue::Serialization {
                    message: e.to_string(),
                });
                0.0
            }
        };

        let findings = self.policy.sweep(&translated, &self.forbidden);
        log_findings(&findings, "translation");
        issues.extend(findings.iter().map(|f| TranslationIssue::ForbiddenTerm {
            term: f.term.clone(),
            excerpt: f.excerpt.clone(),
        }));

        let alignment = alignment_score(issues.len());
        if issues.is_empty() {
            debug!(role = %self.role(), drift, question_reselected, "Page translated");
        } else {
            for issue in &issues {
                warn!(role = %self.role(), %issue, "Translation issue");
            }
            info!(
                role = %self.role(),
                issues = issues.len(),
                alignment,
                "Page translated with issues"
            );
        }

        TranslationOutcome {
            page: translated,
            issues,
            findings,
            drift,
            question_reselected,
            alignment_score: alignment,
        }
    }

    /// Keep the translated question if it still carries one of the role's
    /// top action keywords; otherwise pick the role template for the
    /// original question's intent.
    fn reselect_question(&self, original: &str, translated: String) -> (String, bool) {
        let keywords = self.vocabulary.top_action_keywords();
        if keywords.is_empty() {
            return (translated, false);
        }

        let lower = translated.to_lowercase();
        if keywords.iter().any(|k| lower.contains(&k.to_lowercase())) {
            return (translated, false);
        }

        let intent = QuestionIntent::detect(original);
        let template = self.vocabulary.question_templates.for_intent(intent);
        if template.trim().is_empty() {
            return (translated, false);
        }
        debug!(role = %self.role(), ?intent, "Question re-selected from role templates");
        (template.to_string(), true)
    }

    /// Key-path equality and length drift over the serialized pages.
    fn compare_serialized(
        &self,
        original: &Page,
        translated: &Page,
        issues: &mut Vec<TranslationIssue>,
    ) -> std::result::Result<f64, serde_json::Error> {
        let before = serde_json::to_value(original)?;
        let after = serde_json::to_value(translated)?;

        let before_paths = key_paths(&before);
        let after_paths = key_paths(&after);
        if before_paths != after_paths {
            issues.push(TranslationIssue::StructureMismatch {
                missing: before_paths.difference(&after_paths).cloned().collect(),
                unexpected: after_paths.difference(&before_paths).cloned().collect(),
            });
        }

        let original_len = flattened_len(&before);
        let translated_len = flattened_len(&after);
        let drift = if original_len == 0 {
            0.0
        } else {
            original_len.abs_diff(translated_len) as f64 / original_len as f64
        };
        if drift > self.max_drift {
            issues.push(TranslationIssue::LengthDrift {
                original: original_len,
                translated: translated_len,
                drift,
                limit: self.max_drift,
            });
        }
        Ok(drift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhythmcard_config::{SafetyConfig, VocabularyRegistry};
    use rhythmcard_core::{DailyContent, Section};

    fn translator(role: Role) -> RoleTranslator {
        let registry = VocabularyRegistry::builtin().unwrap();
        let policy = Arc::new(SafetyPolicy::from_config(&SafetyConfig::default()).unwrap());
        RoleTranslator::new(registry.get(role), policy, 0.3).unwrap()
    }

    fn office_page() -> Page {
        let mut content = DailyContent::empty("2025-06-02");
        content.summary = "Bright day; pace your workday with intent.".into();
        content.keywords = vec!["deep work".into(), "meetings".into()];
        content.rhythm_description =
            "Across working hours, protect one project from back-to-back meetings.".into();
        content.action_guide.do_items = vec!["Share a proposal with your colleagues".into()];
        content.action_guide.avoid = vec!["Saying yes to every meeting".into()];
        content.rhythm_question = "Which task will you prioritize when the day gets busy?".into();
        let mut page = Page {
            content,
            ..Page::default()
        };
        page.extensions.insert(
            "interest_focus".into(),
            Section::Ready {
                explanation: "Bring your project energy to chess.".into(),
                items: vec!["chess".into()],
            },
        );
        page
    }

    #[test]
    fn office_page_translates_to_student_vocabulary() {
        let outcome = translator(Role::Student).translate_page(&office_page());
        let c = &outcome.page.content;
        assert_eq!(c.summary, "Bright day; pace your school day with intent.");
        assert_eq!(c.keywords[1], "study groups");
        assert!(c.rhythm_description.contains("protect one assignment"));
        assert_eq!(c.action_guide.do_items[0], "Share a proposal with your classmates");
        match &outcome.page.extensions["interest_focus"] {
            Section::Ready { explanation, .. } => assert!(explanation.contains("assignment energy")),
            other => panic!("unexpected section {other:?}"),
        }
    }

    #[test]
    fn question_without_role_keyword_is_reselected() {
        let outcome = translator(Role::Student).translate_page(&office_page());
        assert!(outcome.question_reselected);
        assert_eq!(
            outcome.page.content.rhythm_question,
            "What would make today's study time feel worthwhile?"
        );
    }

    #[test]
    fn completion_intent_picks_completion_template() {
        let mut page = office_page();
        page.content.rhythm_question = "What can you finish before noon?".into();
        let outcome = translator(Role::Freelancer).translate_page(&page);
        assert!(outcome.question_reselected);
        assert_eq!(
            outcome.page.content.rhythm_question,
            "Which piece of work can you ship before you log off?"
        );
    }

    #[test]
    fn question_with_keyword_is_kept() {
        let mut page = office_page();
        page.content.rhythm_question = "What will you study first?".into();
        let outcome = translator(Role::Student).translate_page(&page);
        assert!(!outcome.question_reselected);
        assert_eq!(outcome.page.content.rhythm_question, "What will you study first?");
    }

    #[test]
    fn clean_translation_is_fully_aligned() {
        let outcome = translator(Role::Student).translate_page(&office_page());
        assert!(outcome.is_aligned(), "{:?}", outcome.issues);
        assert_eq!(outcome.alignment_score, 1.0);
        assert!(outcome.drift <= 0.3);
    }

    #[test]
    fn forbidden_terms_are_reported_not_repaired() {
        let mut page = office_page();
        page.content.meaning_shift = "Your homework tonight is rest.".into();
        // "homework" is forbidden for office workers but the office map rewrites it,
        // so plant a term the map does not cover.
        page.content.summary = "Your day master favors calm.".into();
        let outcome = translator(Role::OfficeWorker).translate_page(&page);
        assert!(outcome.page.content.meaning_shift.contains("follow-up"));
        assert!(outcome.page.content.summary.contains("day master"));
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].term, "day master");
        assert!((outcome.alignment_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn large_length_change_is_flagged() {
        let registry = VocabularyRegistry::from_vocabularies([{
            let mut v = RoleVocabulary::empty(Role::Student);
            v.vocabulary_map
                .insert("x".into(), "a much longer replacement phrase".into());
            v
        }]);
        let policy = Arc::new(SafetyPolicy::from_config(&SafetyConfig::default()).unwrap());
        let t = RoleTranslator::new(registry.get(Role::Student), policy, 0.3).unwrap();

        let mut page = Page::default();
        page.content.summary = "x x x x".into();
        let outcome = t.translate_page(&page);
        assert!(
            outcome
                .issues
                .iter()
                .any(|i| matches!(i, TranslationIssue::LengthDrift { .. }))
        );
        assert!(outcome.alignment_score < 1.0);
    }

    #[test]
    fn alignment_score_floors_at_zero() {
        assert_eq!(alignment_score(0), 1.0);
        assert!((alignment_score(2) - 0.6).abs() < 1e-9);
        assert_eq!(alignment_score(7), 0.0);
    }

    #[test]
    fn translated_key_paths_match_for_every_role() {
        let page = office_page();
        let before = key_paths(&serde_json::to_value(&page).unwrap());
        for role in Role::ALL {
            let outcome = translator(role).translate_page(&page);
            let after = key_paths(&serde_json::to_value(&outcome.page).unwrap());
            assert_eq!(before, after, "{role}");
        }
    }
}
