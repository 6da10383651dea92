//! Role translation for rhythmcard pages.
//!
//! Rewrites a page into one role's vocabulary, then checks that the
//! result kept its shape, its length, and stayed clear of the role's
//! forbidden terms. Problems are reported as issues; nothing is repaired
//! after the fact.

pub mod phrase_map;
pub mod translator;

pub use phrase_map::PhraseMap;
pub use translator::{RoleTranslator, TranslationIssue, TranslationOutcome, alignment_score};
