//! Rhythm question: one reflective question per day.
//!
//! Pools are keyed by role × energy bucket; the day of month picks the entry.

use crate::generator::{BlockGenerator, GenerationInput};
use rhythmcard_core::{BlockContent, BlockType, EnergyBucket, Role, select};

pub fn question_pool(role: Role, bucket: EnergyBucket) -> &'static [&'static str] {
    use EnergyBucket::*;
    match (role, bucket) {
        (Role::Student, High) => &[
            "What could you learn today if you aimed a little higher?",
            "Which topic will you study first while energy is high?",
            "How can you review today's progress before you rest?",
        ],
        (Role::Student, Medium) => &[
            "What is one thing you want to learn well today?",
            "Which notes deserve a calm review this afternoon?",
            "How will you study today without rushing?",
        ],
        (Role::Student, Low) => &[
            "What is the lightest way to review something today?",
            "What small thing could you learn without pressure?",
            "How can you study gently and still feel done?",
        ],
        (Role::OfficeWorker, High) => &[
            "What bold item will you prioritize first today?",
            "Which result can you deliver before noon?",
            "What would you plan differently if nothing held you back?",
        ],
        (Role::OfficeWorker, Medium) => &[
            "Which task will you prioritize when the day gets busy?",
            "What is one thing you can deliver calmly today?",
            "How will you plan the next three hours?",
        ],
        (Role::OfficeWorker, Low) => &[
            "What is the one thing worth the effort to prioritize?",
            "How can you plan a gentler day and still deliver?",
            "What can you deliver today without rushing?",
        ],
        (Role::Freelancer, High) => &[
            "What will you create while your energy peaks?",
            "Which piece of work will you ship today?",
            "Who deserves a pitch from you this week?",
        ],
        (Role::Freelancer, Medium) => &[
            "What can you create in two focused hours?",
            "Which small update could you ship today?",
            "What idea is worth a quiet pitch draft?",
        ],
        (Role::Freelancer, Low) => &[
            "What could you create just for yourself today?",
            "What can you ship without pushing yourself?",
            "Which pitch can wait until your energy returns?",
        ],
    }
}

pub struct RhythmQuestionGenerator;

impl BlockGenerator for RhythmQuestionGenerator {
    fn block_type(&self) -> BlockType {
        BlockType::RhythmQuestion
    }

    fn content(&self, input: &GenerationInput<'_>) -> BlockContent {
        let ctx = input.context;
        let pool = question_pool(ctx.role, ctx.energy_bucket);
        let question = select::pick_by_day(pool, ctx.date)
            .copied()
            .unwrap_or("What would make today feel well spent?");
        BlockContent::Text(question.to_string())
    }

    fn personalization_level(&self, _input: &GenerationInput<'_>) -> f32 {
        0.5
    }
}
