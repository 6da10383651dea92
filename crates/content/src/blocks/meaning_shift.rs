//! Meaning shift: reframe the day's main challenge.
//!
//! Keyed on the rhythm's own energy level: ≥4 high, ≤2 low. The high
//! variant frames intensity as drive.

use super::{lower_first, or_fallback};
use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::{BlockContent, BlockType, EnergyBucket};

const CHALLENGE_FALLBACK: &str = "scattered attention";

pub struct MeaningShiftGenerator;

impl BlockGenerator for MeaningShiftGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::MeaningShift
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        let challenge = lower_first(or_fallback(input.signal.top_challenge(), CHALLENGE_FALLBACK));
        let text = match EnergyBucket::from_level(input.signal.energy) {
            EnergyBucket::High => format!(
                "Today's intensity is drive, not pressure. Point it at {challenge} and keep moving."
            ),
            EnergyBucket::Medium => format!(
                "A steady day is not a dull one. Treat {challenge} as practice; small gains count."
            ),
            EnergyBucket::Low => format!(
                "A slower day is a recovery day, not a lost one. Meet {challenge} gently."
            ),
        };
        BlockContent::Text(text)
    }

    fn personalization_level(&self, _input: &GenerationInput<'_>) -> f32 {
        0.6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::tests_support::signal;
    use chrono::NaiveDate;
    use rhythmcard_core::{Personality, Profile, Role};
    use rhythmcard_persona::{analyze, map_decisions};

    fn shift(energy: u8) -> String {
        let profile = Profile::new("ms-user", Role::Freelancer, Personality::default());
        let ctx = analyze(&profile, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
        let decisions = map_decisions(&ctx, &profile);
        let sig = signal(energy);
        let input = GenerationInput {
            context: &ctx,
            profile: &profile,
            signal: &sig,
            decisions: &decisions,
        };
        match MeaningShiftGenerator.content(&input) {
            BlockContent::Text(s) => s,
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn high_energy_frames_drive_not_burnout() {
        for energy in [4, 5] {
            let text = shift(energy);
            assert!(text.contains("drive"));
            assert!(!text.to_lowercase().contains("burnout"));
            assert!(text.contains("scattered attention"));
        }
    }

    #[test]
    fn low_energy_frames_recovery() {
        assert!(shift(1).contains("recovery day"));
        assert!(shift(2).contains("recovery day"));
        assert!(shift(3).contains("steady day"));
    }
}
