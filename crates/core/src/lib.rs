//! # rhythmcard core
//!
//! Domain types, errors, and text utilities for the rhythmcard
//! personalization pipeline. This crate has **no pipeline logic**: it
//! defines the shared model every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every entity is declared exactly once, here. The analyzer, mapper,
//! block generators, translator, and orchestrator all import these types
//! instead of redeclaring their own shapes. Text-bearing values implement
//! [`TextFields`] so that translation, jargon sweeps, and character
//! budgeting all walk the same fields.

pub mod block;
pub mod context;
pub mod error;
pub mod page;
pub mod profile;
pub mod rhythm;
pub mod select;
pub mod text;
pub mod vocabulary;

// Re-export key types at crate root for ergonomics
pub use block::{
    ActionGuide, BlockContent, BlockType, ContentBlock, FocusCaution, StateTrigger, TextFields,
    TimeDirection,
};
pub use context::{Depth, EnergyBucket, PainPoint, PersonalizationContext, Season, Tone, TraitTag};
pub use error::{Error, ProfileError, Result, RhythmError};
pub use page::{CANONICAL_KEYS, DailyContent, Extensions, Page, Section};
pub use profile::{Interests, Personality, Profile, Role};
pub use rhythm::{RhythmSignal, RhythmSource};
pub use vocabulary::{QuestionIntent, QuestionTemplates, RoleVocabulary};
