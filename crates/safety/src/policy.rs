//! The versioned forbidden-term policy and its compiled matchers.

use crate::SafetyError;
use crate::findings::{Finding, FindingKind};
use regex::Regex;
use rhythmcard_config::SafetyConfig;
use rhythmcard_core::{RhythmSignal, RoleVocabulary, TextFields};

/// Characters of context kept on each side of a hit in an excerpt.
const EXCERPT_RADIUS: usize = 24;

/// A compiled, case-insensitive, whole-word matcher over a term list.
///
/// Case folding and word boundaries are Unicode-aware, so Hangul and
/// accented terms match the same way ASCII terms do.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    terms: Vec<String>,
    pattern: Option<Regex>,
}

impl TermMatcher {
    pub fn new(terms: impl IntoIterator<Item = String>) -> Result<Self, SafetyError> {
        let mut terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        // Longest first so "day master" wins over a shorter overlapping term.
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();

        if terms.is_empty() {
            return Ok(Self {
                terms,
                pattern: None,
            });
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
            .map_err(|e| SafetyError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            terms,
            pattern: Some(pattern),
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }

    /// Every hit in `text`, as `(configured term, excerpt)`.
    pub fn find_all(&self, text: &str) -> Vec<(String, String)> {
        let Some(pattern) = &self.pattern else {
            return vec![];
        };
        pattern
            .find_iter(text)
            .map(|m| {
                (
                    m.as_str().to_lowercase(),
                    excerpt(text, m.start(), m.end()),
                )
            })
            .collect()
    }

    /// Replace every hit with `replacement`.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, regex::NoExpand(replacement))
                .into_owned(),
            None => text.to_string(),
        }
    }
}

/// Cut a short excerpt around `[start, end)` on char boundaries.
fn excerpt(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(EXCERPT_RADIUS)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(EXCERPT_RADIUS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[from..to].trim().to_string()
}

/// The single safety policy shared by every text-emitting stage.
#[derive(Debug, Clone)]
pub struct SafetyPolicy {
    version: String,
    replacement: String,
    jargon: TermMatcher,
}

impl SafetyPolicy {
    pub fn new(
        version: impl Into<String>,
        jargon_terms: impl IntoIterator<Item = String>,
        replacement: impl Into<String>,
    ) -> Result<Self, SafetyError> {
        Ok(Self {
            version: version.into(),
            replacement: replacement.into(),
            jargon: TermMatcher::new(jargon_terms)?,
        })
    }

    pub fn from_config(config: &SafetyConfig) -> Result<Self, SafetyError> {
        Self::new(
            config.version.clone(),
            config.jargon_terms.iter().cloned(),
            config.replacement.clone(),
        )
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn jargon_terms(&self) -> &[String] {
        self.jargon.terms()
    }

    /// Replace jargon in one upstream string with the generic phrase.
    pub fn scrub(&self, text: &str) -> String {
        self.jargon.replace_all(text, &self.replacement)
    }

    /// Scrub every text field of a rhythm signal.
    ///
    /// Returns the cleaned signal and one finding per replaced term.
    pub fn scrub_signal(&self, signal: RhythmSignal) -> (RhythmSignal, Vec<Finding>) {
        let mut findings = Vec::new();
        let cleaned = signal.map_text(|text| {
            for (term, excerpt) in self.jargon.find_all(text) {
                findings.push(Finding {
                    kind: FindingKind::Scrubbed,
                    term,
                    excerpt,
                    policy_version: self.version.clone(),
                });
            }
            self.scrub(text)
        });
        (cleaned, findings)
    }

    /// The matcher for a role: global jargon plus the role's own forbidden terms.
    pub fn matcher_for(&self, vocab: &RoleVocabulary) -> Result<TermMatcher, SafetyError> {
        TermMatcher::new(
            self.jargon
                .terms()
                .iter()
                .cloned()
                .chain(vocab.forbidden_terms.iter().cloned()),
        )
    }

    /// Sweep every user-facing string of `value` for forbidden terms.
    pub fn sweep<T: TextFields>(&self, value: &T, matcher: &TermMatcher) -> Vec<Finding> {
        value
            .texts()
            .into_iter()
            .flat_map(|text| matcher.find_all(text))
            .map(|(term, excerpt)| Finding {
                kind: FindingKind::Forbidden,
                term,
                excerpt,
                policy_version: self.version.clone(),
            })
            .collect()
    }
}
