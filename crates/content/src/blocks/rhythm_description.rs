//! Rhythm description: the main paragraph of the page.
//!
//! Sentences, in order: energy, opportunity/challenge (tone-aware), role
//! context, optional trait note (detailed depth only), pain-point note,
//! season, closing affirmation.

use super::{lower_first, or_fallback};
use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::{
    BlockContent, BlockType, Depth, EnergyBucket, PainPoint, Role, Season, Tone, TraitTag,
};

const OPPORTUNITY_FALLBACK: &str = "steady progress";
const CHALLENGE_FALLBACK: &str = "scattered attention";

pub struct RhythmDescriptionGenerator;

impl BlockGenerator for RhythmDescriptionGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::RhythmDescription
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        let ctx = input.context;
        let opportunity = lower_first(or_fallback(
            input.signal.top_opportunity(),
            OPPORTUNITY_FALLBACK,
        ));
        let challenge = lower_first(or_fallback(input.signal.top_challenge(), CHALLENGE_FALLBACK));

        let mut sentences: Vec<String> = vec![
            energy_sentence(EnergyBucket::from_level(input.signal.energy)).to_string(),
            tone_sentence(ctx.tone, &opportunity, &challenge),
            role_sentence(ctx.role).to_string(),
        ];

        if ctx.depth == Depth::Detailed && !ctx.is_balanced() {
            if let Some(first) = ctx.dominant_traits.first() {
                sentences.push(format!("Lean on your {} side.", trait_label(*first)));
            }
        }

        sentences.push(pain_sentence(&ctx.pain_points).to_string());

        sentences.push(season_sentence(ctx.season).to_string());

        sentences.push("You have what you need today.".to_string());
        BlockContent::Text(sentences.join(" "))
    }

    fn personalization_level(&self, input: &GenerationInput<'_>) -> f32 {
        if input.context.has_pain_point(PainPoint::GeneralWellbeing) {
            0.7
        } else {
            0.9
        }
    }
}

fn energy_sentence(bucket: EnergyBucket) -> &'static str {
    match bucket {
        EnergyBucket::High => "Energy runs high today; momentum comes easily.",
        EnergyBucket::Medium => "Energy sits in a steady middle range today.",
        EnergyBucket::Low => "Energy is low today, which favors a slower pace.",
    }
}

fn tone_sentence(tone: Tone, opportunity: &str, challenge: &str) -> String {
    match tone {
        Tone::Analytical => {
            format!("The pattern favors {opportunity} and flags {challenge}.")
        }
        Tone::Supportive => {
            format!("There is room for {opportunity}; go gently around {challenge}.")
        }
        Tone::Formal => {
            format!("Main opportunity: {opportunity}. Main challenge: {challenge}.")
        }
        Tone::Casual => format!("Lean into {opportunity} and don't sweat {challenge} too much."),
    }
}

fn role_sentence(role: Role) -> &'static str {
    match role {
        Role::Student => "In classes and study blocks, small steps add up.",
        Role::OfficeWorker => "At work, a clear order of priorities helps.",
        Role::Freelancer => "In self-set work blocks, simple structure keeps you moving.",
    }
}

/// Anxiety first, then procrastination, else a general note.
fn pain_sentence(pains: &[PainPoint]) -> &'static str {
    if pains.contains(&PainPoint::AnxietyManagement) {
        "If worry shows up, return to one task."
    } else if pains.contains(&PainPoint::Procrastination) {
        "Start with a two-minute version of the task you keep putting off."
    } else {
        "Notice what drains you and what restores you."
    }
}

fn season_sentence(season: Season) -> &'static str {
    match season {
        Season::Spring => "Spring favors fresh starts.",
        Season::Summer => "Summer light supports outward effort.",
        Season::Autumn => "Autumn invites you to gather and refine.",
        Season::Winter => "Winter asks for rest and quiet planning.",
    }
}

fn trait_label(tag: TraitTag) -> &'static str {
    match tag {
        TraitTag::Extraverted => "outgoing",
        TraitTag::Introverted => "reflective",
        TraitTag::Conscientious => "organized",
        TraitTag::Spontaneous => "spontaneous",
        TraitTag::OpenMinded => "curious",
        TraitTag::Conventional => "practical",
        TraitTag::Cooperative => "cooperative",
        TraitTag::Independent => "independent",
        TraitTag::Sensitive => "sensitive",
        TraitTag::EmotionallyStable => "steady",
        TraitTag::Analytical => "analytical",
        TraitTag::Intuitive => "intuitive",
        TraitTag::Proactive => "proactive",
        TraitTag::Reactive => "responsive",
        TraitTag::DetailOriented => "detail-minded",
        TraitTag::BigPicture => "big-picture",
        TraitTag::Balanced => "balanced",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::tests_support::signal;
    use chrono::NaiveDate;
    use rhythmcard_core::{Personality, Profile, text::char_len};
    use rhythmcard_persona::{analyze, map_decisions};

    fn describe(personality: Personality, role: Role, energy: u8) -> String {
        let profile = Profile::new("desc-user", role, personality);
        let ctx = analyze(&profile, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        let decisions = map_decisions(&ctx, &profile);
        let sig = signal(energy);
        let input = GenerationInput {
            context: &ctx,
            profile: &profile,
            signal: &sig,
            decisions: &decisions,
        };
        match RhythmDescriptionGenerator.content(&input) {
            BlockContent::Text(s) => s,
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn anxiety_clause_takes_priority() {
        let p = Personality {
            neuroticism: 80.0,
            conscientiousness: 20.0,
            ..Personality::default()
        };
        let text = describe(p, Role::OfficeWorker, 3);
        assert!(text.contains("If worry shows up"));
        assert!(!text.contains("two-minute version"));
    }

    #[test]
    fn procrastination_clause_without_anxiety() {
        let p = Personality {
            conscientiousness: 20.0,
            ..Personality::default()
        };
        assert!(describe(p, Role::Student, 3).contains("two-minute version"));
    }

    #[test]
    fn includes_opportunity_challenge_and_season() {
        let text = describe(Personality::default(), Role::Freelancer, 4);
        assert!(text.contains("a fresh start on a stalled task"));
        assert!(text.contains("scattered attention"));
        assert!(text.contains("Autumn"));
        assert!(text.starts_with("Energy runs high"));
    }

    #[test]
    fn brief_depth_keeps_season() {
        let p = Personality {
            detail_oriented: 20.0,
            ..Personality::default()
        };
        let text = describe(p, Role::Student, 2);
        assert!(text.contains("Autumn invites you"));
        assert!(!text.contains(" side."));
    }

    #[test]
    fn detailed_depth_names_leading_trait() {
        let p = Personality {
            detail_oriented: 90.0,
            ..Personality::default()
        };
        assert!(describe(p, Role::Student, 3).contains("detail-minded side"));
    }

    #[test]
    fn length_stays_in_paragraph_range() {
        for role in Role::ALL {
            for energy in 1..=5 {
                let len = char_len(&describe(Personality::default(), role, energy));
                assert!((200..=480).contains(&len), "{role} energy {energy}: {len}");
            }
        }
    }
}
