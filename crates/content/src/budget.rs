//! Character budget validator.
//!
//! Each block has a `{min, max, target}` range and the page has one more.
//! Out-of-range lengths are reported, never corrected here.

use rhythmcard_config::{BudgetConfig, CharRange};
use rhythmcard_core::text::char_len;
use rhythmcard_core::{BlockType, ContentBlock, DailyContent, TextFields};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Inside `[min, max]` but further than this fraction from target ⇒ nudge.
const TARGET_TOLERANCE: f64 = 0.2;

/// What to do about a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Suggestion {
    /// Below minimum by `by` characters.
    Expand { by: usize },
    /// Above maximum by `by` characters.
    Trim { by: usize },
    /// In range but far from target; positive `delta` means add characters.
    MoveTowardTarget { delta: i64 },
    WithinTarget,
}

impl Suggestion {
    pub fn for_length(actual: usize, range: CharRange) -> Self {
        if actual < range.min {
            return Suggestion::Expand {
                by: range.min - actual,
            };
        }
        if actual > range.max {
            return Suggestion::Trim {
                by: actual - range.max,
            };
        }
        let delta = range.target as i64 - actual as i64;
        if (delta.unsigned_abs() as f64) > range.target as f64 * TARGET_TOLERANCE {
            Suggestion::MoveTowardTarget { delta }
        } else {
            Suggestion::WithinTarget
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Expand { by } => write!(f, "expand by {by} characters"),
            Suggestion::Trim { by } => write!(f, "trim {by} characters"),
            Suggestion::MoveTowardTarget { delta } if *delta > 0 => {
                write!(f, "move toward target: add about {delta} characters")
            }
            Suggestion::MoveTowardTarget { delta } => {
                write!(f, "move toward target: cut about {} characters", delta.unsigned_abs())
            }
            Suggestion::WithinTarget => f.write_str("within target"),
        }
    }
}

/// Result of checking one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBudgetResult {
    pub block: BlockType,
    pub actual: usize,
    pub min: usize,
    pub max: usize,
    pub target: usize,
    pub valid: bool,
    pub suggestion: Suggestion,
}

/// Result of checking a whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub blocks: Vec<BlockBudgetResult>,
    pub missing: Vec<BlockType>,
    pub total: usize,
    pub page: CharRange,
    pub page_valid: bool,
    pub page_suggestion: Suggestion,
}

impl BudgetReport {
    pub fn is_valid(&self) -> bool {
        self.page_valid && self.missing.is_empty() && self.blocks.iter().all(|b| b.valid)
    }

    /// Human-readable violations, one per line item.
    pub fn issues(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .missing
            .iter()
            .map(|b| format!("block '{b}' is missing"))
            .collect();
        out.extend(self.blocks.iter().filter(|b| !b.valid).map(|b| {
            format!(
                "block '{}' has {} characters, expected {}–{} ({})",
                b.block, b.actual, b.min, b.max, b.suggestion
            )
        }));
        if !self.page_valid {
            out.push(format!(
                "page has {} characters, expected {}–{} ({})",
                self.total, self.page.min, self.page.max, self.page_suggestion
            ));
        }
        out
    }
}

/// Budget validator over a configured budget table.
#[derive(Debug, Clone, Default)]
pub struct CharBudget {
    config: BudgetConfig,
}

impl CharBudget {
    pub fn new(config: BudgetConfig) -> Self {
        Self { config }
    }

    pub fn range_for(&self, block: BlockType) -> CharRange {
        self.config.range_for(block)
    }

    /// Check a character count against a block's range.
    pub fn check(&self, block: BlockType, actual: usize) -> BlockBudgetResult {
        let range = self.range_for(block);
        BlockBudgetResult {
            block,
            actual,
            min: range.min,
            max: range.max,
            target: range.target,
            valid: range.contains(actual),
            suggestion: Suggestion::for_length(actual, range),
        }
    }

    /// Check a single piece of text for a block.
    pub fn validate_block(&self, block: BlockType, text: &str) -> BlockBudgetResult {
        self.check(block, char_len(text))
    }

    /// Check generated blocks. A block type with no block is reported missing.
    pub fn validate_blocks(&self, blocks: &[ContentBlock]) -> BudgetReport {
        let measured = BlockType::ALL
            .into_iter()
            .map(|bt| (bt, blocks.iter().find(|b| b.block_type == bt).map(ContentBlock::char_len)));
        self.report(measured)
    }

    /// Check an assembled page. An empty block field is reported missing.
    pub fn validate_page(&self, content: &DailyContent) -> BudgetReport {
        let measured = BlockType::ALL.into_iter().map(|bt| {
            let len = field_len(content, bt);
            (bt, (len > 0).then_some(len))
        });
        self.report(measured)
    }

    fn report(&self, measured: impl Iterator<Item = (BlockType, Option<usize>)>) -> BudgetReport {
        let mut blocks = Vec::new();
        let mut missing = Vec::new();
        for (block, len) in measured {
            match len {
                Some(len) => blocks.push(self.check(block, len)),
                None => missing.push(block),
            }
        }

        let total: usize = blocks.iter().map(|b| b.actual).sum();
        let page = self.config.page;
        let report = BudgetReport {
            page_valid: page.contains(total),
            page_suggestion: Suggestion::for_length(total, page),
            blocks,
            missing,
            total,
            page,
        };

        if report.is_valid() {
            debug!(total, "Character budget satisfied");
        } else {
            for issue in report.issues() {
                warn!(%issue, "Character budget violation");
            }
        }
        report
    }
}

fn field_len(content: &DailyContent, block: BlockType) -> usize {
    match block {
        BlockType::Summary => content.summary.char_len(),
        BlockType::Keywords => content.keywords.char_len(),
        BlockType::RhythmDescription => content.rhythm_description.char_len(),
        BlockType::FocusCaution => content.focus_caution.char_len(),
        BlockType::ActionGuide => content.action_guide.char_len(),
        BlockType::TimeDirection => content.time_direction.char_len(),
        BlockType::StateTrigger => content.state_trigger.char_len(),
        BlockType::MeaningShift => content.meaning_shift.char_len(),
        BlockType::RhythmQuestion => content.rhythm_question.char_len(),
    }
}
