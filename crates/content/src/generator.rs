//! BlockGenerator trait: one implementation per canonical block.
//!
//! Generators are pure: the same [`GenerationInput`] always yields the
//! same block. The registry runs them in canonical page order.

use rhythmcard_core::{BlockContent, BlockType, ContentBlock, PersonalizationContext, Profile, RhythmSignal};
use rhythmcard_persona::MappedDecisions;
use std::collections::BTreeMap;
use tracing::debug;

/// Everything a generator may read.
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    pub context: &'a PersonalizationContext,
    pub profile: &'a Profile,
    /// Already scrubbed and role-adapted.
    pub signal: &'a RhythmSignal,
    pub decisions: &'a MappedDecisions,
}

pub trait BlockGenerator: Send + Sync {
    /// The block this generator produces.
    fn block_type(&self) -> BlockType;

    /// The block's content for this input.
    fn content(&self, input: &GenerationInput<'_>) -> BlockContent;

    /// How strongly the block reflects the individual profile, 0.0–1.0.
    fn personalization_level(&self, input: &GenerationInput<'_>) -> f32;

    /// Build the full block with its deterministic identity.
    fn generate(&self, input: &GenerationInput<'_>) -> ContentBlock {
        ContentBlock::new(
            &input.context.profile_id,
            input.context.date,
            self.block_type(),
            self.content(input),
            self.personalization_level(input),
        )
    }
}

/// The set of block generators, keyed by block type.
pub struct GeneratorRegistry {
    generators: BTreeMap<BlockType, Box<dyn BlockGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    /// Register a generator. Replaces any existing one for the same block type.
    pub fn register(&mut self, generator: Box<dyn BlockGenerator>) {
        self.generators.insert(generator.block_type(), generator);
    }

    pub fn get(&self, block_type: BlockType) -> Option<&dyn BlockGenerator> {
        self.generators.get(&block_type).map(|g| g.as_ref())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Run every registered generator in canonical page order.
    pub fn generate_all(&self, input: &GenerationInput<'_>) -> Vec<ContentBlock> {
        let blocks: Vec<ContentBlock> = self
            .generators
            .values()
            .map(|g| g.generate(input))
            .collect();
        debug!(
            profile = %input.context.profile_id,
            blocks = blocks.len(),
            "Blocks generated"
        );
        blocks
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
