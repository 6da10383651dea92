use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::{BlockContent, BlockType};

pub struct FocusCautionGenerator;

impl BlockGenerator for FocusCautionGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::FocusCaution
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        BlockContent::FocusCaution(input.decisions.focus_caution.clone())
    }

    fn personalization_level(&self, _input: &GenerationInput<'_>) -> f32 {
        0.8
    }
}
