//! Personalization strategy for rhythmcard.
//!
//! Two pure stages:
//!
//! 1. **Analyzer**: profile + date → [`PersonalizationContext`]
//!    (tone, depth, dominant traits, pain points, energy bucket, season)
//! 2. **Mapper**: context + profile → [`MappedDecisions`]
//!    (keywords, action guide, focus/caution points) from role×energy tables
//!
//! Both are total functions: any validated profile yields a result.
//!
//! [`PersonalizationContext`]: rhythmcard_core::PersonalizationContext

pub mod analyzer;
pub mod mapper;

pub use analyzer::{analyze, analyze_as, dominant_traits, pain_points, resolve_depth, resolve_tone};
pub use mapper::{MappedDecisions, map_decisions};
