//! Rhythm signal: the opaque daily indicators from the upstream calculator.
//!
//! The pipeline never computes these values itself. A [`RhythmSource`]
//! hands them over; text fields must be scrubbed before anything derived
//! from them reaches a user.

use crate::error::RhythmError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Daily indicators for one (profile, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhythmSignal {
    /// Overall energy, 1–5.
    pub energy: u8,
    /// Focus level, 1–5.
    pub focus: u8,
    /// Social energy, 1–5.
    pub social: u8,
    /// Decision clarity, 1–5.
    pub decision: u8,

    #[serde(default)]
    pub good_times: Vec<String>,
    #[serde(default)]
    pub caution_times: Vec<String>,
    #[serde(default)]
    pub good_directions: Vec<String>,

    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
}

impl RhythmSignal {
    /// Clamp every level into 1–5. Upstream data is not trusted to be in range.
    pub fn clamped(mut self) -> Self {
        for level in [
            &mut self.energy,
            &mut self.focus,
            &mut self.social,
            &mut self.decision,
        ] {
            *level = (*level).clamp(MIN_LEVEL, MAX_LEVEL);
        }
        self
    }

    /// Apply a text transform to every free-text field.
    pub fn map_text(self, mut f: impl FnMut(&str) -> String) -> Self {
        let mut map_list = |items: Vec<String>| items.iter().map(|s| f(s.as_str())).collect::<Vec<_>>();
        let good_times = map_list(self.good_times);
        let caution_times = map_list(self.caution_times);
        let good_directions = map_list(self.good_directions);
        let opportunities = map_list(self.opportunities);
        let challenges = map_list(self.challenges);
        let theme = f(&self.theme);
        Self {
            good_times,
            caution_times,
            good_directions,
            theme,
            opportunities,
            challenges,
            ..self
        }
    }

    pub fn top_opportunity(&self) -> Option<&str> {
        first_non_empty(&self.opportunities)
    }

    pub fn top_challenge(&self) -> Option<&str> {
        first_non_empty(&self.challenges)
    }
}

fn first_non_empty(items: &[String]) -> Option<&str> {
    items.iter().map(|s| s.trim()).find(|s| !s.is_empty())
}

/// The upstream rhythm collaborator, seen from inside the pipeline.
///
/// Implementations must be side-effect free from the caller's point of
/// view; a failure is recovered by the orchestrator, never retried.
pub trait RhythmSource: Send + Sync {
    /// Human-readable source name (for logs).
    fn name(&self) -> &str;

    /// Fetch the signal for one profile on one date.
    fn fetch(&self, profile_id: &str, date: NaiveDate) -> Result<RhythmSignal, RhythmError>;
}
