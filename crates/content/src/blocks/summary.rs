//! Summary: one line: energy adjective, theme, role closing.

use super::{lower_first, or_fallback};
use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::rhythm::{MAX_LEVEL, MIN_LEVEL};
use rhythmcard_core::{BlockContent, BlockType, Role, select};

/// Adjective pools indexed by energy tier 1–5.
pub const TIER_ADJECTIVES: [&[&str]; 5] = [
    &["Quiet", "Restful", "Gentle"],
    &["Calm", "Unhurried", "Measured"],
    &["Steady", "Balanced", "Even"],
    &["Bright", "Energized", "Lively"],
    &["Radiant", "Powerful", "Vibrant"],
];

/// The highest-tier pool, used at energy 5.
pub const PEAK_ADJECTIVES: &[&str] = TIER_ADJECTIVES[4];

const THEME_FALLBACK: &str = "steady progress";

pub struct SummaryGenerator;

impl BlockGenerator for SummaryGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::Summary
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        let ctx = input.context;
        let tier = input.signal.energy.clamp(MIN_LEVEL, MAX_LEVEL);
        let pool = TIER_ADJECTIVES[usize::from(tier - 1)];
        let adjective = select::pick(pool, &ctx.profile_id, ctx.date, "summary")
            .copied()
            .unwrap_or("Steady");
        let theme = lower_first(or_fallback(Some(&input.signal.theme), THEME_FALLBACK));
        let closing = match ctx.role {
            Role::Student => "keep your study rhythm simple",
            Role::OfficeWorker => "pace your workday with intent",
            Role::Freelancer => "shape the work rhythm you own",
        };
        BlockContent::Text(format!("{adjective} day for {theme}; {closing}."))
    }

    fn personalization_level(&self, _input: &GenerationInput<'_>) -> f32 {
        0.5
    }
}
