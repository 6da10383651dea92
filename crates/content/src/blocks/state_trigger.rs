//! State trigger: a gesture, a phrase, and when to use them.
//!
//! One of four canned triples, chosen by pain-point priority:
//! anxiety > procrastination > social energy drain > default.

use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::{BlockContent, BlockType, PainPoint, StateTrigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Calming,
    Starting,
    Recharging,
    Centering,
}

impl TriggerKind {
    pub fn for_pains(pains: &[PainPoint]) -> Self {
        if pains.contains(&PainPoint::AnxietyManagement) {
            TriggerKind::Calming
        } else if pains.contains(&PainPoint::Procrastination) {
            TriggerKind::Starting
        } else if pains.contains(&PainPoint::SocialEnergyDrain) {
            TriggerKind::Recharging
        } else {
            TriggerKind::Centering
        }
    }

    pub fn trigger(&self) -> StateTrigger {
        let (gesture, phrase, how_to) = match self {
            TriggerKind::Calming => (
                "Hand on your chest, one slow breath out",
                "I am safe; one step at a time",
                "When tension rises, take three calm breaths.",
            ),
            TriggerKind::Starting => (
                "Tap the desk twice before you begin",
                "Just the first five minutes",
                "Use it when you notice a delay; start a timer and do the smallest piece.",
            ),
            TriggerKind::Recharging => (
                "Step outside and roll your shoulders back",
                "My energy is mine to spend",
                "Use it after busy conversations; take two quiet minutes alone.",
            ),
            TriggerKind::Centering => (
                "Press your thumb and finger together",
                "Steady and clear, one thing at a time",
                "Use it before each new task to mark a fresh start.",
            ),
        };
        StateTrigger {
            gesture: gesture.to_string(),
            phrase: phrase.to_string(),
            how_to: how_to.to_string(),
        }
    }
}

pub struct StateTriggerGenerator;

impl BlockGenerator for StateTriggerGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::StateTrigger
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        BlockContent::StateTrigger(TriggerKind::for_pains(&input.context.pain_points).trigger())
    }

    fn personalization_level(&self, input: &GenerationInput<'_>) -> f32 {
        match TriggerKind::for_pains(&input.context.pain_points) {
            TriggerKind::Centering => 0.5,
            _ => 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anxiety_outranks_everything() {
        let pains = [
            PainPoint::SocialEnergyDrain,
            PainPoint::Procrastination,
            PainPoint::AnxietyManagement,
        ];
        let trigger = TriggerKind::for_pains(&pains).trigger();
        assert!(trigger.phrase.contains("safe"));
        assert!(trigger.how_to.contains("calm"));
    }

    #[test]
    fn priority_order() {
        assert_eq!(
            TriggerKind::for_pains(&[PainPoint::SocialEnergyDrain, PainPoint::Procrastination]),
            TriggerKind::Starting
        );
        assert_eq!(
            TriggerKind::for_pains(&[PainPoint::SocialEnergyDrain]),
            TriggerKind::Recharging
        );
        assert_eq!(
            TriggerKind::for_pains(&[PainPoint::GeneralWellbeing]),
            TriggerKind::Centering
        );
    }
}
