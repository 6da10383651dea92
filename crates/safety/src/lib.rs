//! Content safety for rhythmcard: the single forbidden-term policy.
//!
//! Provides:
//! - **Scrub-on-read**: replace internal jargon in upstream rhythm text with a generic phrase
//! - **Sweep-on-write**: find forbidden terms in any user-facing text before it leaves the pipeline
//! - **Findings**: structured records of every hit, logged through `tracing`
//!
//! One versioned [`SafetyPolicy`] is built from configuration at startup and
//! injected into every stage that emits text. No stage keeps its own list.

pub mod findings;
pub mod policy;

pub use findings::{Finding, FindingKind, log_findings};
pub use policy::{SafetyPolicy, TermMatcher};

/// Errors from building the safety policy.
#[derive(Debug, thiserror::Error)]
pub enum SafetyError {
    #[error("invalid forbidden-term pattern: {0}")]
    InvalidPattern(String),
}

impl From<SafetyError> for rhythmcard_core::Error {
    fn from(e: SafetyError) -> Self {
        rhythmcard_core::Error::Config {
            message: e.to_string(),
        }
    }
}
