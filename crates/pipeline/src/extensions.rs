//! Extension sections that ride alongside the canonical page.
//!
//! `interest_focus` is built from the profile's interests and activity
//! choices. `weekly_outlook` and `relationship_notes` are not built yet
//! and always carry a pending placeholder.

use rhythmcard_core::{EnergyBucket, Extensions, PersonalizationContext, Profile, Section};

pub const INTEREST_FOCUS: &str = "interest_focus";
pub const WEEKLY_OUTLOOK: &str = "weekly_outlook";
pub const RELATIONSHIP_NOTES: &str = "relationship_notes";

const MAX_ITEMS: usize = 5;

pub fn build(context: &PersonalizationContext, profile: &Profile) -> Extensions {
    let mut sections = Extensions::new();
    sections.insert(INTEREST_FOCUS.to_string(), interest_focus(context, profile));
    sections.insert(
        WEEKLY_OUTLOOK.to_string(),
        Section::Pending {
            placeholder: "Your weekly outlook will appear here soon.".into(),
        },
    );
    sections.insert(
        RELATIONSHIP_NOTES.to_string(),
        Section::Pending {
            placeholder: "Relationship notes will appear here soon.".into(),
        },
    );
    sections
}

fn interest_focus(context: &PersonalizationContext, profile: &Profile) -> Section {
    let mut items: Vec<String> = Vec::new();
    let candidates = profile
        .interests
        .primary
        .iter()
        .chain(profile.activities.values().flatten())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    for item in candidates {
        if items.len() == MAX_ITEMS {
            break;
        }
        if !items.contains(&item) {
            items.push(item);
        }
    }

    let Some(first) = items.first() else {
        return Section::Pending {
            placeholder: "Add interests to your profile to see them here.".into(),
        };
    };

    let explanation = match context.energy_bucket {
        EnergyBucket::High => format!("Energy is high: give {first} a real slot today."),
        EnergyBucket::Medium => format!("Keep {first} in the day as a steady anchor."),
        EnergyBucket::Low => format!("Let {first} be a gentle way to recharge."),
    };
    Section::Ready { explanation, items }
}
