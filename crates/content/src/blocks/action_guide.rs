use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::{BlockContent, BlockType};

pub struct ActionGuideGenerator;

impl BlockGenerator for ActionGuideGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::ActionGuide
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        BlockContent::ActionGuide(input.decisions.action_guide.clone())
    }

    fn personalization_level(&self, _input: &GenerationInput<'_>) -> f32 {
        0.6
    }
}
