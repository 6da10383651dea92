//! Content mapper: role × energy lookup tables.
//!
//! Keywords and action guides come straight from the tables; focus and
//! caution points are assembled from personality rules, then role rules,
//! then one energy caution, capped at three each.

use rhythmcard_core::{
    ActionGuide, EnergyBucket, FocusCaution, PersonalizationContext, Personality, Profile, Role,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_POINTS: usize = 3;
const INTEREST_SLOT: usize = 3;
const FOCUS_FALLBACK: &str = "maintain balance";
const CAUTION_FALLBACK: &str = "avoid rushing decisions";

/// Everything the block generators take from the mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedDecisions {
    pub keywords: Vec<String>,
    pub action_guide: ActionGuide,
    pub focus_caution: FocusCaution,
}

pub fn map_decisions(context: &PersonalizationContext, profile: &Profile) -> MappedDecisions {
    let role = context.role;
    let bucket = context.energy_bucket;

    let decisions = MappedDecisions {
        keywords: keywords(role, bucket, profile.primary_interest()),
        action_guide: action_guide(role, bucket),
        focus_caution: focus_caution(&profile.personality, role, bucket),
    };

    debug!(
        role = %role,
        energy = bucket.as_str(),
        keywords = decisions.keywords.len(),
        focus = decisions.focus_caution.focus.len(),
        caution = decisions.focus_caution.caution.len(),
        "Content mapped"
    );

    decisions
}

// ── Keywords ────────────────────────────────────────────────────────────

fn keyword_table(role: Role, bucket: EnergyBucket) -> &'static [&'static str] {
    use EnergyBucket::*;
    match (role, bucket) {
        (Role::Student, High) => &["momentum", "active learning", "curiosity", "group study", "stretch goals"],
        (Role::Student, Medium) => &["steady review", "note-taking", "balance", "small wins"],
        (Role::Student, Low) => &["gentle pace", "rest", "light review", "self-care"],
        (Role::OfficeWorker, High) => &["initiative", "deep work", "collaboration", "visible progress", "clear priorities"],
        (Role::OfficeWorker, Medium) => &["prioritize", "steady output", "focus blocks", "follow-through"],
        (Role::OfficeWorker, Low) => &["pacing", "essentials only", "recovery", "clear boundaries"],
        (Role::Freelancer, High) => &["creative drive", "outreach", "shipping", "new ideas", "bold pitches"],
        (Role::Freelancer, Medium) => &["consistency", "craft", "routine", "client care"],
        (Role::Freelancer, Low) => &["recharge", "admin catch-up", "inspiration", "boundaries"],
    }
}

/// Table keywords with the 4th slot swapped for the primary interest.
fn keywords(role: Role, bucket: EnergyBucket, interest: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = keyword_table(role, bucket)
        .iter()
        .map(|k| k.to_string())
        .collect();

    if let Some(interest) = interest.map(|i| i.trim().to_lowercase()) {
        if !interest.is_empty() && !out.contains(&interest) {
            if let Some(slot) = out.get_mut(INTEREST_SLOT) {
                *slot = interest;
            }
        }
    }
    out
}

// ── Action guide ────────────────────────────────────────────────────────

fn action_guide(role: Role, bucket: EnergyBucket) -> ActionGuide {
    use EnergyBucket::*;
    let (do_items, avoid): (&[&str], &[&str]) = match (role, bucket) {
        (Role::Student, High) => (
            &[
                "Tackle the hardest topic first",
                "Explain one idea to a classmate",
                "Set one stretch goal",
            ],
            &["Cramming several subjects at once"],
        ),
        (Role::Student, Medium) => (
            &[
                "Review yesterday's notes for ten minutes",
                "Set one clear study goal for the day",
            ],
            &["Switching subjects every few minutes"],
        ),
        (Role::Student, Low) => (
            &[
                "Choose one light review task",
                "Take a short walk between study blocks",
            ],
            &[
                "Starting a new topic late at night",
                "Comparing your pace with others",
            ],
        ),
        (Role::OfficeWorker, High) => (
            &[
                "Start the task you keep delaying",
                "Share a proposal with your team",
                "Block an hour for deep work",
            ],
            &["Saying yes to every meeting"],
        ),
        (Role::OfficeWorker, Medium) => (
            &[
                "Write down your top three priorities",
                "Batch messages into two check-in times",
            ],
            &["Multitasking during meetings"],
        ),
        (Role::OfficeWorker, Low) => (
            &[
                "Handle routine tasks first",
                "Leave on time and rest properly",
            ],
            &[
                "Making big commitments today",
                "Skipping lunch to catch up",
            ],
        ),
        (Role::Freelancer, High) => (
            &[
                "Pitch one new idea to a client",
                "Ship a visible piece of work",
                "Reach out to a past contact",
            ],
            &["Overbooking your calendar"],
        ),
        (Role::Freelancer, Medium) => (
            &[
                "Work in two focused blocks",
                "Send short updates to active clients",
            ],
            &["Letting small requests derail your plan"],
        ),
        (Role::Freelancer, Low) => (
            &[
                "Catch up on admin and invoices",
                "Collect inspiration without pressure",
            ],
            &[
                "Taking on rush projects",
                "Working past your stopping time",
            ],
        ),
    };

    ActionGuide {
        do_items: do_items.iter().map(|s| s.to_string()).collect(),
        avoid: avoid.iter().map(|s| s.to_string()).collect(),
    }
}

// ── Focus / caution ─────────────────────────────────────────────────────

fn focus_caution(p: &Personality, role: Role, bucket: EnergyBucket) -> FocusCaution {
    let mut focus = PointList::default();
    if p.conscientiousness >= 65.0 {
        focus.push("Follow through on your plan");
    }
    if p.openness >= 65.0 {
        focus.push("Try one new approach");
    }
    if p.analytical >= 65.0 {
        focus.push("Break big problems into steps");
    }
    if p.extraversion >= 65.0 {
        focus.push("Seek people who energize you");
    }
    focus.push(match role {
        Role::Student => "Review what you learned today",
        Role::OfficeWorker => "Protect one block for deep work",
        Role::Freelancer => "Give your best hour to your main project",
    });

    let mut caution = PointList::default();
    if p.neuroticism >= 65.0 {
        caution.push("Don't let worry set the pace");
    }
    if p.conscientiousness <= 40.0 {
        caution.push("Avoid postponing the first step");
    }
    if p.agreeableness >= 75.0 {
        caution.push("Don't overcommit to others");
    }
    if p.detail_oriented >= 75.0 {
        caution.push("Don't polish past good enough");
    }
    caution.push(match role {
        Role::Student => "Avoid studying late into the night",
        Role::OfficeWorker => "Avoid back-to-back meetings without breaks",
        Role::Freelancer => "Avoid letting work spill into rest time",
    });
    caution.push(match bucket {
        EnergyBucket::High => "Don't spread yourself too thin",
        EnergyBucket::Medium => "Watch for a mid-afternoon energy dip",
        EnergyBucket::Low => "Don't push past your limits",
    });

    FocusCaution {
        focus: focus.finish(FOCUS_FALLBACK),
        caution: caution.finish(CAUTION_FALLBACK),
    }
}

/// Capped, de-duplicated point list.
#[derive(Default)]
struct PointList(Vec<String>);

impl PointList {
    fn push(&mut self, point: &str) {
        if self.0.len() < MAX_POINTS && !self.0.iter().any(|p| p == point) {
            self.0.push(point.to_string());
        }
    }

    fn finish(self, fallback: &str) -> Vec<String> {
        if self.0.is_empty() {
            vec![fallback.to_string()]
        } else {
            self.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()
    }

    #[test]
    fn every_table_cell_yields_three_to_five_keywords() {
        for role in Role::ALL {
            for bucket in EnergyBucket::ALL {
                let plain = keywords(role, bucket, None);
                assert!(
                    (3..=5).contains(&plain.len()),
                    "{role}/{} has {} keywords",
                    bucket.as_str(),
                    plain.len()
                );
                let with_interest = keywords(role, bucket, Some("Photography"));
                assert!((3..=5).contains(&with_interest.len()));
            }
        }
    }

    #[test]
    fn interest_swaps_fourth_slot() {
        let kw = keywords(Role::OfficeWorker, EnergyBucket::Medium, Some("  Rock Climbing "));
        assert_eq!(kw[3], "rock climbing");
        assert_eq!(kw[0], "prioritize");
        assert_eq!(kw.len(), 4);
    }

    #[test]
    fn profile_interest_reaches_keywords() {
        let mut profile = Profile::new("u-kw", Role::Student, Personality::default());
        profile.interests.primary = vec!["Chess".into(), "Music".into()];
        let ctx = analyze(&profile, date());
        let mapped = map_decisions(&ctx, &profile);
        assert!(mapped.keywords.contains(&"chess".to_string()));
        assert!(!mapped.keywords.contains(&"music".to_string()));
    }

    #[test]
    fn action_guides_respect_item_counts() {
        for role in Role::ALL {
            for bucket in EnergyBucket::ALL {
                let guide = action_guide(role, bucket);
                assert!((2..=3).contains(&guide.do_items.len()));
                assert!((1..=2).contains(&guide.avoid.len()));
            }
        }
    }

    #[test]
    fn focus_caution_capped_at_three() {
        let p = Personality {
            conscientiousness: 90.0,
            openness: 90.0,
            analytical: 90.0,
            extraversion: 90.0,
            neuroticism: 90.0,
            agreeableness: 90.0,
            detail_oriented: 90.0,
            proactive: 50.0,
        };
        let fc = focus_caution(&p, Role::Freelancer, EnergyBucket::High);
        assert_eq!(fc.focus.len(), 3);
        assert_eq!(fc.caution.len(), 3);
        assert_eq!(fc.focus[0], "Follow through on your plan");
        assert_eq!(fc.caution[0], "Don't let worry set the pace");
    }

    #[test]
    fn neutral_personality_gets_role_and_energy_points() {
        let fc = focus_caution(&Personality::default(), Role::Student, EnergyBucket::Low);
        assert_eq!(fc.focus, vec!["Review what you learned today"]);
        assert_eq!(
            fc.caution,
            vec!["Avoid studying late into the night", "Don't push past your limits"]
        );
    }

    #[test]
    fn point_list_falls_back_when_empty() {
        assert_eq!(PointList::default().finish(FOCUS_FALLBACK), vec!["maintain balance"]);
        let mut list = PointList::default();
        list.push("a");
        list.push("a");
        assert_eq!(list.finish(CAUTION_FALLBACK), vec!["a"]);
    }
}
