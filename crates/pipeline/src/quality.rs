//! Quality scores: ordering heuristics, not guarantees.

use rhythmcard_core::{ContentBlock, PainPoint, PersonalizationContext, Profile};
use serde::{Deserialize, Serialize};

const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    /// Mean block personalization level × 10.
    pub personalization: f64,
    /// Grows with the number of specific pain points.
    pub uniqueness: f64,
    /// Grows with the number of declared interests.
    pub relevance: f64,
    /// Translation alignment, 0.0–1.0.
    pub alignment: f64,
}

impl QualityScores {
    pub fn compute(
        blocks: &[ContentBlock],
        context: &PersonalizationContext,
        profile: &Profile,
        alignment: f64,
    ) -> Self {
        let personalization = if blocks.is_empty() {
            0.0
        } else {
            let sum: f64 = blocks
                .iter()
                .map(|b| f64::from(b.personalization_level))
                .sum();
            sum / blocks.len() as f64 * MAX_SCORE
        };

        let specific_pains = context
            .pain_points
            .iter()
            .filter(|p| **p != PainPoint::GeneralWellbeing)
            .count();
        let uniqueness = 4.0 + 1.5 * specific_pains as f64;
        let relevance = 5.0 + profile.interests.total() as f64;

        Self {
            personalization: personalization.clamp(0.0, MAX_SCORE),
            uniqueness: uniqueness.clamp(0.0, MAX_SCORE),
            relevance: relevance.clamp(0.0, MAX_SCORE),
            alignment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rhythmcard_core::{BlockContent, BlockType, Personality, Role};
    use rhythmcard_persona::analyze;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 8).unwrap()
    }

    #[test]
    fn personalization_is_mean_level_times_ten() {
        let profile = Profile::new("q", Role::Student, Personality::default());
        let ctx = analyze(&profile, date());
        let blocks = vec![
            ContentBlock::new("q", date(), BlockType::Summary, BlockContent::Text("a".into()), 0.4),
            ContentBlock::new("q", date(), BlockType::Keywords, BlockContent::List(vec![]), 0.8),
        ];
        let scores = QualityScores::compute(&blocks, &ctx, &profile, 1.0);
        assert!((scores.personalization - 6.0).abs() < 1e-6);
        assert_eq!(scores.uniqueness, 4.0);
        assert_eq!(scores.relevance, 5.0);
    }

    #[test]
    fn scores_are_clamped() {
        let mut profile = Profile::new(
            "q",
            Role::Freelancer,
            Personality {
                neuroticism: 90.0,
                conscientiousness: 10.0,
                extraversion: 10.0,
                agreeableness: 90.0,
                detail_oriented: 90.0,
                proactive: 10.0,
                ..Personality::default()
            },
        );
        profile.interests.secondary = (0..12).map(|i| format!("hobby {i}")).collect();
        let ctx = analyze(&profile, date());
        let scores = QualityScores::compute(&[], &ctx, &profile, 0.6);
        assert_eq!(scores.uniqueness, 10.0);
        assert_eq!(scores.relevance, 10.0);
        assert_eq!(scores.personalization, 0.0);
    }
}
