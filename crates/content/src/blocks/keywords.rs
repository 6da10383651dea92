use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::{BlockContent, BlockType};

/// Keywords pass straight through from the mapper.
pub struct KeywordsGenerator;

impl BlockGenerator for KeywordsGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::Keywords
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        BlockContent::List(input.decisions.keywords.clone())
    }

    fn personalization_level(&self, input: &GenerationInput<'_>) -> f32 {
        if input.profile.primary_interest().is_some() {
            0.8
        } else {
            0.6
        }
    }
}
