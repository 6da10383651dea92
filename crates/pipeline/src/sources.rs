//! Rhythm sources: where the daily signal comes from.
//!
//! - [`JsonRhythmSource`]: a date-keyed JSON file
//! - [`FallbackRhythm`]: deterministic synthesis from SHA-256 of the date
//! - [`UnavailableSource`]: always fails; exercises the fallback path

use chrono::NaiveDate;
use rhythmcard_core::{RhythmError, RhythmSignal, RhythmSource};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Signals keyed by ISO date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default)]
pub struct JsonRhythmSource {
    signals: BTreeMap<String, RhythmSignal>,
}

impl JsonRhythmSource {
    pub fn from_path(path: &Path) -> Result<Self, RhythmError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RhythmError::Unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, RhythmError> {
        let signals: BTreeMap<String, RhythmSignal> =
            serde_json::from_str(raw).map_err(|e| RhythmError::Malformed(e.to_string()))?;
        debug!(days = signals.len(), "Loaded rhythm signals");
        Ok(Self { signals })
    }

    pub fn insert(&mut self, date: NaiveDate, signal: RhythmSignal) {
        self.signals.insert(date.to_string(), signal);
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl RhythmSource for JsonRhythmSource {
    fn name(&self) -> &str {
        "json"
    }

    fn fetch(&self, _profile_id: &str, date: NaiveDate) -> Result<RhythmSignal, RhythmError> {
        let key = date.to_string();
        self.signals
            .get(&key)
            .cloned()
            .map(RhythmSignal::clamped)
            .ok_or(RhythmError::MissingDate { date: key })
    }
}

/// A source that never answers.
#[derive(Debug, Clone, Default)]
pub struct UnavailableSource;

impl RhythmSource for UnavailableSource {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn fetch(&self, _profile_id: &str, _date: NaiveDate) -> Result<RhythmSignal, RhythmError> {
        Err(RhythmError::Unavailable("no rhythm source configured".into()))
    }
}

// ── Deterministic fallback ──────────────────────────────────────────────

const GOOD_TIMES: &[&str] = &["7-9 AM", "9-11 AM", "1-3 PM", "3-5 PM", "5-7 PM"];
const CAUTION_TIMES: &[&str] = &["11 AM-1 PM", "after 9 PM", "early afternoon", "late evening"];
const DIRECTIONS: &[&str] = &[
    "north",
    "northeast",
    "east",
    "southeast",
    "south",
    "southwest",
    "west",
    "northwest",
];
const THEMES: &[&str] = &[
    "Growth through patient effort",
    "Clarity before speed",
    "Small steps, steady gains",
    "Connection and exchange",
    "Rest as preparation",
    "Finishing what you started",
    "Curiosity over certainty",
    "Quiet confidence",
];
const OPPORTUNITIES: &[&str] = &[
    "a fresh start on a stalled task",
    "an honest conversation",
    "learning something new",
    "tidying loose ends",
    "a creative detour",
    "asking for help early",
];
const CHALLENGES: &[&str] = &[
    "scattered attention",
    "rushing decisions",
    "overcommitting",
    "second-guessing yourself",
    "draining small talk",
    "late-evening fatigue",
];

/// Synthesises a plausible signal from the date alone.
///
/// Same date, same signal, for every profile.
#[derive(Debug, Clone, Default)]
pub struct FallbackRhythm;

impl FallbackRhythm {
    pub fn signal_for(&self, date: NaiveDate) -> RhythmSignal {
        let digest = Sha256::digest(date.to_string().as_bytes());
        let level = |i: usize| 1 + digest[i] % 5;
        let pick = |pool: &[&str], i: usize| pool[usize::from(digest[i]) % pool.len()].to_string();

        RhythmSignal {
            energy: level(0),
            focus: level(1),
            social: level(2),
            decision: level(3),
            good_times: vec![pick(GOOD_TIMES, 4)],
            caution_times: vec![pick(CAUTION_TIMES, 5)],
            good_directions: vec![pick(DIRECTIONS, 6)],
            theme: pick(THEMES, 7),
            opportunities: vec![pick(OPPORTUNITIES, 8)],
            challenges: vec![pick(CHALLENGES, 9)],
        }
    }
}

impl RhythmSource for FallbackRhythm {
    fn name(&self) -> &str {
        "fallback"
    }

    fn fetch(&self, _profile_id: &str, date: NaiveDate) -> Result<RhythmSignal, RhythmError> {
        Ok(self.signal_for(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn fallback_is_deterministic_and_in_range() {
        let fb = FallbackRhythm;
        for d in 1..=30 {
            let a = fb.signal_for(date(d));
            assert_eq!(a, fb.signal_for(date(d)));
            for level in [a.energy, a.focus, a.social, a.decision] {
                assert!((1..=5).contains(&level));
            }
            assert!(!a.theme.is_empty());
            assert_eq!(a.good_directions.len(), 1);
        }
    }

    #[test]
    fn fallback_varies_across_dates() {
        let fb = FallbackRhythm;
        let distinct: std::collections::BTreeSet<_> =
            (1..=30).map(|d| fb.signal_for(date(d)).theme).collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn json_source_clamps_levels() {
        let raw = r#"{
            "2025-04-02": {"energy": 9, "focus": 0, "social": 3, "decision": 2, "theme": "Bold"}
        }"#;
        let source = JsonRhythmSource::from_json(raw).unwrap();
        let signal = source.fetch("u1", date(2)).unwrap();
        assert_eq!(signal.energy, 5);
        assert_eq!(signal.focus, 1);
        assert!(signal.good_times.is_empty());
    }

    #[test]
    fn json_source_reports_missing_date() {
        let source = JsonRhythmSource::default();
        let err = source.fetch("u1", date(3)).unwrap_err();
        assert!(matches!(err, RhythmError::MissingDate { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = JsonRhythmSource::from_json("{not json").unwrap_err();
        assert!(matches!(err, RhythmError::Malformed(_)));
    }

    #[test]
    fn json_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhythm.json");
        std::fs::write(
            &path,
            r#"{"2025-04-05": {"energy": 4, "focus": 3, "social": 2, "decision": 5}}"#,
        )
        .unwrap();
        let source = JsonRhythmSource::from_path(&path).unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.fetch("u1", date(5)).unwrap().decision, 5);
    }

    #[test]
    fn unavailable_source_always_fails() {
        assert!(UnavailableSource.fetch("u1", date(1)).is_err());
    }
}
