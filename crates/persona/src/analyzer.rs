//! Profile analyzer: derive the personalization context from raw dimensions.
//!
//! Resolution order matters: tone is a priority chain (first rule wins),
//! pain points are independent rules plus role augmentation, and every
//! output has a default so the analyzer never fails.

use chrono::NaiveDate;
use rhythmcard_core::{
    Depth, EnergyBucket, PainPoint, Personality, PersonalizationContext, Profile, Role, Season,
    Tone, TraitTag,
};
use tracing::debug;

/// Minimum trait strength to count as dominant.
const DOMINANT_THRESHOLD: f64 = 60.0;
/// At most this many dominant traits are reported.
const MAX_DOMINANT: usize = 3;

/// Analyze a profile for its own role.
pub fn analyze(profile: &Profile, date: NaiveDate) -> PersonalizationContext {
    analyze_as(profile, date, profile.role)
}

/// Analyze a profile for an explicit request role.
pub fn analyze_as(profile: &Profile, date: NaiveDate, role: Role) -> PersonalizationContext {
    let p = &profile.personality;
    let context = PersonalizationContext {
        profile_id: profile.id.clone(),
        date,
        role,
        tone: resolve_tone(p),
        depth: resolve_depth(p),
        dominant_traits: dominant_traits(p),
        pain_points: pain_points(p, role),
        energy_bucket: energy_bucket(p),
        season: Season::from_date(date),
    };

    debug!(
        profile = %context.profile_id,
        role = %role,
        tone = ?context.tone,
        depth = ?context.depth,
        energy = context.energy_bucket.as_str(),
        pain_points = context.pain_points.len(),
        "Profile analyzed"
    );

    context
}

/// All sixteen trait strengths: each dimension paired with its complement.
fn trait_scores(p: &Personality) -> [(TraitTag, f64); 16] {
    [
        (TraitTag::Extraverted, p.extraversion),
        (TraitTag::Introverted, 100.0 - p.extraversion),
        (TraitTag::Conscientious, p.conscientiousness),
        (TraitTag::Spontaneous, 100.0 - p.conscientiousness),
        (TraitTag::OpenMinded, p.openness),
        (TraitTag::Conventional, 100.0 - p.openness),
        (TraitTag::Cooperative, p.agreeableness),
        (TraitTag::Independent, 100.0 - p.agreeableness),
        (TraitTag::Sensitive, p.neuroticism),
        (TraitTag::EmotionallyStable, 100.0 - p.neuroticism),
        (TraitTag::Analytical, p.analytical),
        (TraitTag::Intuitive, 100.0 - p.analytical),
        (TraitTag::Proactive, p.proactive),
        (TraitTag::Reactive, 100.0 - p.proactive),
        (TraitTag::DetailOriented, p.detail_oriented),
        (TraitTag::BigPicture, 100.0 - p.detail_oriented),
    ]
}

/// Top three traits scoring ≥60, strongest first, or `[Balanced]`.
///
/// Equal scores keep declaration order.
pub fn dominant_traits(p: &Personality) -> Vec<TraitTag> {
    let mut strong: Vec<(TraitTag, f64)> = trait_scores(p)
        .into_iter()
        .filter(|(_, score)| *score >= DOMINANT_THRESHOLD)
        .collect();

    if strong.is_empty() {
        return vec![TraitTag::Balanced];
    }

    strong.sort_by(|a, b| b.1.total_cmp(&a.1));
    strong
        .into_iter()
        .take(MAX_DOMINANT)
        .map(|(tag, _)| tag)
        .collect()
}

/// Tone priority chain. The first matching rule wins.
pub fn resolve_tone(p: &Personality) -> Tone {
    if p.analytical >= 65.0 {
        Tone::Analytical
    } else if p.extraversion >= 65.0 && p.agreeableness >= 60.0 {
        Tone::Supportive
    } else if p.conscientiousness >= 65.0 && p.openness < 50.0 {
        Tone::Formal
    } else if p.openness >= 65.0 {
        Tone::Casual
    } else {
        Tone::Supportive
    }
}

pub fn resolve_depth(p: &Personality) -> Depth {
    if p.detail_oriented >= 65.0 {
        Depth::Detailed
    } else if p.detail_oriented <= 35.0 {
        Depth::Brief
    } else {
        Depth::Standard
    }
}

/// Pain points from threshold rules, then role augmentation. Never empty.
pub fn pain_points(p: &Personality, role: Role) -> Vec<PainPoint> {
    let mut found: Vec<PainPoint> = Vec::new();
    let mut add = |pain: PainPoint| {
        if !found.contains(&pain) {
            found.push(pain);
        }
    };

    let anxious = p.neuroticism >= 65.0;
    let disorganized = p.conscientiousness <= 40.0;

    if anxious {
        add(PainPoint::AnxietyManagement);
        add(PainPoint::StressResponse);
    }
    if disorganized {
        add(PainPoint::Procrastination);
        add(PainPoint::Organization);
    }
    if p.extraversion <= 35.0 {
        add(PainPoint::SocialEnergyDrain);
    }
    if p.agreeableness >= 75.0 {
        add(PainPoint::BoundarySetting);
    }
    if p.detail_oriented >= 75.0 {
        add(PainPoint::Perfectionism);
    }
    if p.proactive <= 35.0 {
        add(PainPoint::LowInitiative);
    }

    match role {
        Role::Student => {
            if disorganized {
                add(PainPoint::StudyDiscipline);
            }
            if anxious {
                add(PainPoint::ExamPressure);
            }
        }
        Role::OfficeWorker => {
            if anxious {
                add(PainPoint::WorkplaceStress);
            }
            if p.agreeableness >= 75.0 {
                add(PainPoint::WorkLifeBalance);
            }
        }
        Role::Freelancer => {
            if disorganized {
                add(PainPoint::SelfManagement);
            }
            if anxious {
                add(PainPoint::IncomeUncertainty);
            }
        }
    }

    if found.is_empty() {
        found.push(PainPoint::GeneralWellbeing);
    }
    found
}

/// Average of extraversion and proactivity, bucketed at 65/35.
fn energy_bucket(p: &Personality) -> EnergyBucket {
    EnergyBucket::from_score((p.extraversion + p.proactive) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    fn profile(role: Role, personality: Personality) -> Profile {
        Profile::new("tester", role, personality)
    }

    #[test]
    fn neutral_profile_is_balanced() {
        let p = Personality::default();
        assert_eq!(dominant_traits(&p), vec![TraitTag::Balanced]);
        assert_eq!(resolve_tone(&p), Tone::Supportive);
        assert_eq!(resolve_depth(&p), Depth::Standard);
        assert_eq!(
            pain_points(&p, Role::OfficeWorker),
            vec![PainPoint::GeneralWellbeing]
        );
    }

    #[test]
    fn dominant_traits_sorted_and_capped() {
        let p = Personality {
            extraversion: 90.0,
            conscientiousness: 70.0,
            openness: 80.0,
            agreeableness: 10.0, // independent = 90
            neuroticism: 50.0,
            analytical: 50.0,
            proactive: 50.0,
            detail_oriented: 50.0,
        };
        // Extraverted 90 and Independent 90 tie; declaration order keeps Extraverted first.
        assert_eq!(
            dominant_traits(&p),
            vec![
                TraitTag::Extraverted,
                TraitTag::Independent,
                TraitTag::OpenMinded
            ]
        );
    }

    #[test]
    fn complement_traits_qualify() {
        let p = Personality {
            extraversion: 20.0,
            ..Personality::default()
        };
        assert_eq!(dominant_traits(&p), vec![TraitTag::Introverted]);
    }

    #[test]
    fn tone_priority_chain() {
        let analytical = Personality {
            analytical: 70.0,
            extraversion: 90.0,
            agreeableness: 90.0,
            ..Personality::default()
        };
        assert_eq!(resolve_tone(&analytical), Tone::Analytical);

        let supportive = Personality {
            extraversion: 70.0,
            agreeableness: 60.0,
            ..Personality::default()
        };
        assert_eq!(resolve_tone(&supportive), Tone::Supportive);

        let formal = Personality {
            conscientiousness: 80.0,
            openness: 40.0,
            ..Personality::default()
        };
        assert_eq!(resolve_tone(&formal), Tone::Formal);

        let casual = Personality {
            conscientiousness: 80.0,
            openness: 70.0,
            ..Personality::default()
        };
        assert_eq!(resolve_tone(&casual), Tone::Casual);
    }

    #[test]
    fn depth_thresholds() {
        let detailed = Personality {
            detail_oriented: 65.0,
            ..Personality::default()
        };
        let brief = Personality {
            detail_oriented: 35.0,
            ..Personality::default()
        };
        assert_eq!(resolve_depth(&detailed), Depth::Detailed);
        assert_eq!(resolve_depth(&brief), Depth::Brief);
    }

    #[test]
    fn anxious_office_worker_gets_anxiety_management() {
        let p = Personality {
            neuroticism: 80.0,
            ..Personality::default()
        };
        let pains = pain_points(&p, Role::OfficeWorker);
        assert_eq!(pains[0], PainPoint::AnxietyManagement);
        assert!(pains.contains(&PainPoint::StressResponse));
        assert!(pains.contains(&PainPoint::WorkplaceStress));
    }

    #[test]
    fn disorganized_student_gets_study_discipline() {
        let p = Personality {
            conscientiousness: 30.0,
            ..Personality::default()
        };
        let pains = pain_points(&p, Role::Student);
        assert!(pains.contains(&PainPoint::Procrastination));
        assert!(pains.contains(&PainPoint::StudyDiscipline));
        assert!(!pains.contains(&PainPoint::SelfManagement));
    }

    #[test]
    fn role_augmentation_is_role_specific() {
        let p = Personality {
            conscientiousness: 30.0,
            neuroticism: 70.0,
            ..Personality::default()
        };
        let pains = pain_points(&p, Role::Freelancer);
        assert!(pains.contains(&PainPoint::SelfManagement));
        assert!(pains.contains(&PainPoint::IncomeUncertainty));
        assert!(!pains.contains(&PainPoint::StudyDiscipline));
    }

    #[test]
    fn energy_bucket_uses_extraversion_and_proactivity() {
        let high = profile(
            Role::Student,
            Personality {
                extraversion: 80.0,
                proactive: 60.0,
                ..Personality::default()
            },
        );
        assert_eq!(analyze(&high, date()).energy_bucket, EnergyBucket::High);

        let low = profile(
            Role::Student,
            Personality {
                extraversion: 30.0,
                proactive: 40.0,
                ..Personality::default()
            },
        );
        assert_eq!(analyze(&low, date()).energy_bucket, EnergyBucket::Low);
    }

    #[test]
    fn analyze_as_overrides_role() {
        let p = profile(
            Role::Student,
            Personality {
                conscientiousness: 30.0,
                ..Personality::default()
            },
        );
        let ctx = analyze_as(&p, date(), Role::Freelancer);
        assert_eq!(ctx.role, Role::Freelancer);
        assert!(ctx.has_pain_point(PainPoint::SelfManagement));
        assert_eq!(ctx.season, Season::Spring);
    }

    #[test]
    fn analysis_is_deterministic() {
        let p = profile(
            Role::OfficeWorker,
            Personality {
                openness: 77.0,
                neuroticism: 66.0,
                ..Personality::default()
            },
        );
        assert_eq!(analyze(&p, date()), analyze(&p, date()));
    }
}
