//! The canonical daily page: the payload handed to the rendering layer.

use crate::block::{ActionGuide, FocusCaution, StateTrigger, TextFields, TimeDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The ten top-level keys of the canonical output, in page order.
pub const CANONICAL_KEYS: [&str; 10] = [
    "date",
    "summary",
    "keywords",
    "rhythm_description",
    "focus_caution",
    "action_guide",
    "time_direction",
    "state_trigger",
    "meaning_shift",
    "rhythm_question",
];

/// One day's content: the request date plus the nine blocks.
///
/// Every field is always present; empty defaults stand in for blocks that
/// could not be produced, never `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContent {
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub rhythm_description: String,
    pub focus_caution: FocusCaution,
    pub action_guide: ActionGuide,
    pub time_direction: TimeDirection,
    pub state_trigger: StateTrigger,
    pub meaning_shift: String,
    pub rhythm_question: String,
}

impl DailyContent {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }
}

/// The date is metadata, not user-facing copy: it is neither translated
/// nor counted toward the character budget.
impl TextFields for DailyContent {
    fn texts(&self) -> Vec<&str> {
        let mut out = vec![self.summary.as_str()];
        out.extend(self.keywords.texts());
        out.push(&self.rhythm_description);
        out.extend(self.focus_caution.texts());
        out.extend(self.action_guide.texts());
        out.extend(self.time_direction.texts());
        out.extend(self.state_trigger.texts());
        out.push(&self.meaning_shift);
        out.push(&self.rhythm_question);
        out
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        Self {
            date: self.date.clone(),
            summary: f(&self.summary),
            keywords: self.keywords.map_texts(f),
            rhythm_description: f(&self.rhythm_description),
            focus_caution: self.focus_caution.map_texts(f),
            action_guide: self.action_guide.map_texts(f),
            time_direction: self.time_direction.map_texts(f),
            state_trigger: self.state_trigger.map_texts(f),
            meaning_shift: f(&self.meaning_shift),
            rhythm_question: f(&self.rhythm_question),
        }
    }
}

/// An optional business section that rides alongside the canonical page.
///
/// Sections that are not built yet carry an explicit `Pending` placeholder
/// instead of being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section {
    Ready {
        explanation: String,
        items: Vec<String>,
    },
    Pending {
        placeholder: String,
    },
}

impl Section {
    pub fn is_pending(&self) -> bool {
        matches!(self, Section::Pending { .. })
    }
}

impl TextFields for Section {
    fn texts(&self) -> Vec<&str> {
        match self {
            Section::Ready { explanation, items } => {
                let mut out = vec![explanation.as_str()];
                out.extend(items.texts());
                out
            }
            Section::Pending { placeholder } => vec![placeholder.as_str()],
        }
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        match self {
            Section::Ready { explanation, items } => Section::Ready {
                explanation: f(explanation),
                items: items.map_texts(f),
            },
            Section::Pending { placeholder } => Section::Pending {
                placeholder: f(placeholder),
            },
        }
    }
}

/// Named extension sections, ordered by name.
pub type Extensions = BTreeMap<String, Section>;

/// Everything produced for one request: the canonical page and its extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub content: DailyContent,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: Extensions,
}

impl TextFields for Page {
    fn texts(&self) -> Vec<&str> {
        let mut out = self.content.texts();
        for section in self.extensions.values() {
            out.extend(section.texts());
        }
        out
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        Self {
            content: self.content.map_texts(f),
            extensions: self
                .extensions
                .iter()
                .map(|(name, section)| (name.clone(), section.map_texts(f)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_serializes_all_ten_keys() {
        let json = serde_json::to_value(DailyContent::empty("2025-01-01")).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 10);
        for key in CANONICAL_KEYS {
            assert!(obj.contains_key(key), "missing {key}");
            assert!(!obj[key].is_null(), "{key} is null");
        }
    }

    #[test]
    fn date_is_excluded_from_text_fields() {
        let mut content = DailyContent::empty("2025-01-01");
        content.summary = "hello".into();
        assert_eq!(content.char_len(), 5);
        let mapped = content.map_texts(&mut |s| s.to_uppercase());
        assert_eq!(mapped.date, "2025-01-01");
        assert_eq!(mapped.summary, "HELLO");
    }

    #[test]
    fn pending_section_serializes_status() {
        let section = Section::Pending {
            placeholder: "Coming soon".into(),
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(section.is_pending());
    }

    #[test]
    fn page_texts_include_extensions() {
        let mut page = Page::default();
        page.extensions.insert(
            "interest_focus".into(),
            Section::Ready {
                explanation: "abc".into(),
                items: vec!["de".into()],
            },
        );
        assert_eq!(page.char_len(), 5);
    }
}
