//! Time and direction: favorable windows plus the direction to lean toward.

use super::or_fallback;
use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::text::join_or;
use rhythmcard_core::{BlockContent, BlockType, Role, TimeDirection};

const GOOD_TIME_FALLBACK: &str = "late morning";
const AVOID_TIME_FALLBACK: &str = "late evening";
const DIRECTION_FALLBACK: &str = "east";
const NO_OPPOSITE: &str = "no particular direction";

pub struct TimeDirectionGenerator;

impl BlockGenerator for TimeDirectionGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::TimeDirection
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        let signal = input.signal;
        let good_direction = or_fallback(
            signal.good_directions.first().map(String::as_str),
            DIRECTION_FALLBACK,
        )
        .to_string();
        let avoid_direction = opposite_direction(&good_direction)
            .map(|d| match_case(&good_direction, d))
            .unwrap_or_else(|| NO_OPPOSITE.to_string());

        let notes = match input.context.role {
            Role::Student => "Put your hardest review in the good window.",
            Role::OfficeWorker => "Book focused work in the good window.",
            Role::Freelancer => "Save client-facing work for the good window.",
        };

        BlockContent::TimeDirection(TimeDirection {
            good_time: join_or(&signal.good_times, GOOD_TIME_FALLBACK),
            avoid_time: join_or(&signal.caution_times, AVOID_TIME_FALLBACK),
            good_direction,
            avoid_direction,
            notes: notes.to_string(),
        })
    }

    fn personalization_level(&self, _input: &GenerationInput<'_>) -> f32 {
        0.4
    }
}

/// The opposite compass direction, lowercase. `None` for anything unrecognized.
pub fn opposite_direction(direction: &str) -> Option<&'static str> {
    let opposite = match direction.trim().to_ascii_lowercase().as_str() {
        "north" => "south",
        "south" => "north",
        "east" => "west",
        "west" => "east",
        "northeast" | "north-east" => "southwest",
        "southwest" | "south-west" => "northeast",
        "northwest" | "north-west" => "southeast",
        "southeast" | "south-east" => "northwest",
        _ => return None,
    };
    Some(opposite)
}

/// Capitalize `word` when `like` starts with an uppercase letter.
fn match_case(like: &str, word: &str) -> String {
    let capitalized = like.chars().next().is_some_and(char::is_uppercase);
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if capitalized => first.to_uppercase().chain(chars).collect(),
        _ => word.to_string(),
    }
}
