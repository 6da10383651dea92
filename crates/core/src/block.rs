//! Content blocks: the nine canonical named sections of a daily page.

use crate::error::Error;
use crate::text::char_len;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Namespace for name-based block identities.
const BLOCK_NAMESPACE: Uuid = Uuid::from_u128(0x6b1d_52a0_3c4e_4f0a_9d17_2e8c_51aa_07f3);

/// Uniform access to every user-facing string in a value.
///
/// Implemented by every text-bearing shape so that translation, jargon
/// sweeps, and character budgeting walk the same fields.
pub trait TextFields {
    /// Every user-facing string, in field order.
    fn texts(&self) -> Vec<&str>;

    /// Rebuild the value with every string passed through `f`.
    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self
    where
        Self: Sized;

    /// Type-aware flattened length, in characters.
    fn char_len(&self) -> usize {
        self.texts().into_iter().map(char_len).sum()
    }
}

impl TextFields for String {
    fn texts(&self) -> Vec<&str> {
        vec![self.as_str()]
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        f(self)
    }
}

impl TextFields for Vec<String> {
    fn texts(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        self.iter().map(|s| f(s)).collect()
    }
}

/// The nine block types, in canonical page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Summary,
    Keywords,
    RhythmDescription,
    FocusCaution,
    ActionGuide,
    TimeDirection,
    StateTrigger,
    MeaningShift,
    RhythmQuestion,
}

impl BlockType {
    pub const ALL: [BlockType; 9] = [
        BlockType::Summary,
        BlockType::Keywords,
        BlockType::RhythmDescription,
        BlockType::FocusCaution,
        BlockType::ActionGuide,
        BlockType::TimeDirection,
        BlockType::StateTrigger,
        BlockType::MeaningShift,
        BlockType::RhythmQuestion,
    ];

    /// The canonical output key for this block.
    pub fn key(&self) -> &'static str {
        match self {
            BlockType::Summary => "summary",
            BlockType::Keywords => "keywords",
            BlockType::RhythmDescription => "rhythm_description",
            BlockType::FocusCaution => "focus_caution",
            BlockType::ActionGuide => "action_guide",
            BlockType::TimeDirection => "time_direction",
            BlockType::StateTrigger => "state_trigger",
            BlockType::MeaningShift => "meaning_shift",
            BlockType::RhythmQuestion => "rhythm_question",
        }
    }

    /// Default display title.
    pub fn title(&self) -> &'static str {
        match self {
            BlockType::Summary => "Today in one line",
            BlockType::Keywords => "Keywords",
            BlockType::RhythmDescription => "Your rhythm today",
            BlockType::FocusCaution => "Focus and caution",
            BlockType::ActionGuide => "Action guide",
            BlockType::TimeDirection => "Time and direction",
            BlockType::StateTrigger => "State trigger",
            BlockType::MeaningShift => "Meaning shift",
            BlockType::RhythmQuestion => "Question for today",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|b| b.key() == s.trim())
            .ok_or_else(|| Error::Internal(format!("unknown block type: {s}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCaution {
    pub focus: Vec<String>,
    pub caution: Vec<String>,
}

impl TextFields for FocusCaution {
    fn texts(&self) -> Vec<&str> {
        let mut out = self.focus.texts();
        out.extend(self.caution.texts());
        out
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        Self {
            focus: self.focus.map_texts(f),
            caution: self.caution.map_texts(f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGuide {
    #[serde(rename = "do")]
    pub do_items: Vec<String>,
    pub avoid: Vec<String>,
}

impl TextFields for ActionGuide {
    fn texts(&self) -> Vec<&str> {
        let mut out = self.do_items.texts();
        out.extend(self.avoid.texts());
        out
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        Self {
            do_items: self.do_items.map_texts(f),
            avoid: self.avoid.map_texts(f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDirection {
    pub good_time: String,
    pub avoid_time: String,
    pub good_direction: String,
    pub avoid_direction: String,
    pub notes: String,
}

impl TextFields for TimeDirection {
    fn texts(&self) -> Vec<&str> {
        vec![
            &self.good_time,
            &self.avoid_time,
            &self.good_direction,
            &self.avoid_direction,
            &self.notes,
        ]
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        Self {
            good_time: f(&self.good_time),
            avoid_time: f(&self.avoid_time),
            good_direction: f(&self.good_direction),
            avoid_direction: f(&self.avoid_direction),
            notes: f(&self.notes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTrigger {
    pub gesture: String,
    pub phrase: String,
    pub how_to: String,
}

impl TextFields for StateTrigger {
    fn texts(&self) -> Vec<&str> {
        vec![&self.gesture, &self.phrase, &self.how_to]
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        Self {
            gesture: f(&self.gesture),
            phrase: f(&self.phrase),
            how_to: f(&self.how_to),
        }
    }
}

/// The payload of a block: a string or one of the fixed nested shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BlockContent {
    Text(String),
    List(Vec<String>),
    FocusCaution(FocusCaution),
    ActionGuide(ActionGuide),
    TimeDirection(TimeDirection),
    StateTrigger(StateTrigger),
}

impl TextFields for BlockContent {
    fn texts(&self) -> Vec<&str> {
        match self {
            BlockContent::Text(s) => s.texts(),
            BlockContent::List(items) => items.texts(),
            BlockContent::FocusCaution(v) => v.texts(),
            BlockContent::ActionGuide(v) => v.texts(),
            BlockContent::TimeDirection(v) => v.texts(),
            BlockContent::StateTrigger(v) => v.texts(),
        }
    }

    fn map_texts(&self, f: &mut dyn FnMut(&str) -> String) -> Self {
        match self {
            BlockContent::Text(s) => BlockContent::Text(s.map_texts(f)),
            BlockContent::List(items) => BlockContent::List(items.map_texts(f)),
            BlockContent::FocusCaution(v) => BlockContent::FocusCaution(v.map_texts(f)),
            BlockContent::ActionGuide(v) => BlockContent::ActionGuide(v.map_texts(f)),
            BlockContent::TimeDirection(v) => BlockContent::TimeDirection(v.map_texts(f)),
            BlockContent::StateTrigger(v) => BlockContent::StateTrigger(v.map_texts(f)),
        }
    }
}

/// One generated section of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Name-based identity: stable for the same (profile, date, type).
    pub id: Uuid,
    pub block_type: BlockType,
    pub title: String,
    pub content: BlockContent,
    /// How strongly this block reflects the individual profile, 0.0–1.0.
    pub personalization_level: f32,
}

impl ContentBlock {
    pub fn new(
        profile_id: &str,
        date: NaiveDate,
        block_type: BlockType,
        content: BlockContent,
        personalization_level: f32,
    ) -> Self {
        let name = format!("{profile_id}/{date}/{}", block_type.key());
        Self {
            id: Uuid::new_v5(&BLOCK_NAMESPACE, name.as_bytes()),
            block_type,
            title: block_type.title().to_string(),
            content,
            personalization_level: personalization_level.clamp(0.0, 1.0),
        }
    }

    pub fn char_len(&self) -> usize {
        self.content.char_len()
    }
}
