//! The nine built-in block generators.

pub mod action_guide;
pub mod focus_caution;
pub mod keywords;
pub mod meaning_shift;
pub mod rhythm_description;
pub mod rhythm_question;
pub mod state_trigger;
pub mod summary;
pub mod time_direction;

use crate::generator::GeneratorRegistry;

/// A registry holding one generator per canonical block.
pub fn default_registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    registry.register(Box::new(summary::SummaryGenerator));
    registry.register(Box::new(keywords::KeywordsGenerator));
    registry.register(Box::new(rhythm_description::RhythmDescriptionGenerator));
    registry.register(Box::new(focus_caution::FocusCautionGenerator));
    registry.register(Box::new(action_guide::ActionGuideGenerator));
    registry.register(Box::new(time_direction::TimeDirectionGenerator));
    registry.register(Box::new(state_trigger::StateTriggerGenerator));
    registry.register(Box::new(meaning_shift::MeaningShiftGenerator));
    registry.register(Box::new(rhythm_question::RhythmQuestionGenerator));
    registry
}

/// Lowercase the first character, leaving the rest untouched.
pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Trimmed text, or `fallback` when blank.
pub(crate) fn or_fallback<'a>(text: Option<&'a str>, fallback: &'a str) -> &'a str {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => fallback,
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use rhythmcard_core::RhythmSignal;

    pub fn signal(energy: u8) -> RhythmSignal {
        RhythmSignal {
            energy,
            focus: 3,
            social: 3,
            decision: 3,
            good_times: vec!["9-11 AM".into()],
            caution_times: vec!["after 9 PM".into()],
            good_directions: vec!["east".into()],
            theme: "Growth through patient effort".into(),
            opportunities: vec!["a fresh start on a stalled task".into()],
            challenges: vec!["scattered attention".into()],
        }
    }
}
