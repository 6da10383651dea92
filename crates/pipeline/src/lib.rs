//! The rhythmcard daily content pipeline.
//!
//! validate → analyze → fetch/scrub/adapt rhythm → map → generate →
//! assemble → translate → score → validate.
//!
//! Everything is synchronous and deterministic: the same profile, date
//! and role always produce byte-identical pages.

pub mod extensions;
pub mod orchestrator;
pub mod quality;
pub mod sources;

pub use orchestrator::{
    BatchReport, ContentPipeline, DayResult, GenerationOutcome, IssueKind, PipelineIssue,
};
pub use quality::QualityScores;
pub use sources::{FallbackRhythm, JsonRhythmSource, UnavailableSource};
