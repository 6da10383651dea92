//! Schema assembler: fold generated blocks into the canonical page.
//!
//! Every one of the ten keys is always present: a block that was not
//! generated (or carries the wrong content shape) leaves its default.

use rhythmcard_core::{BlockContent, BlockType, ContentBlock, DailyContent, TextFields};
use chrono::NaiveDate;
use tracing::warn;

/// The assembled page plus its flattened character count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPage {
    pub content: DailyContent,
    /// Characters across all nine blocks; the date is not counted.
    pub total_chars: usize,
}

pub fn assemble(date: NaiveDate, blocks: &[ContentBlock]) -> AssembledPage {
    let mut content = DailyContent::empty(date.format("%Y-%m-%d").to_string());

    for block in blocks {
        match (block.block_type, &block.content) {
            (BlockType::Summary, BlockContent::Text(s)) => content.summary = s.clone(),
            (BlockType::Keywords, BlockContent::List(items)) => content.keywords = items.clone(),
            (BlockType::RhythmDescription, BlockContent::Text(s)) => {
                content.rhythm_description = s.clone()
            }
            (BlockType::FocusCaution, BlockContent::FocusCaution(fc)) => {
                content.focus_caution = fc.clone()
            }
            (BlockType::ActionGuide, BlockContent::ActionGuide(ag)) => {
                content.action_guide = ag.clone()
            }
            (BlockType::TimeDirection, BlockContent::TimeDirection(td)) => {
                content.time_direction = td.clone()
            }
            (BlockType::StateTrigger, BlockContent::StateTrigger(st)) => {
                content.state_trigger = st.clone()
            }
            (BlockType::MeaningShift, BlockContent::Text(s)) => content.meaning_shift = s.clone(),
            (BlockType::RhythmQuestion, BlockContent::Text(s)) => {
                content.rhythm_question = s.clone()
            }
            (block_type, _) => {
                warn!(block = %block_type, "Block content shape does not match its type; keeping default");
            }
        }
    }

    let total_chars = content.char_len();
    AssembledPage {
        content,
        total_chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhythmcard_core::CANONICAL_KEYS;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn block(block_type: BlockType, content: BlockContent) -> ContentBlock {
        ContentBlock::new("asm", date(), block_type, content, 0.5)
    }

    #[test]
    fn empty_input_still_has_ten_keys() {
        let page = assemble(date(), &[]);
        let value = serde_json::to_value(&page.content).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 10);
        for key in CANONICAL_KEYS {
            assert!(keys.contains(&key), "missing {key}");
            assert!(!value[key].is_null());
        }
        assert_eq!(page.content.date, "2025-03-14");
        assert_eq!(page.total_chars, 0);
    }

    #[test]
    fn blocks_land_in_their_keys() {
        let page = assemble(
            date(),
            &[
                block(BlockType::Summary, BlockContent::Text("Bright day.".into())),
                block(
                    BlockType::Keywords,
                    BlockContent::List(vec!["focus".into(), "rest".into()]),
                ),
            ],
        );
        assert_eq!(page.content.summary, "Bright day.");
        assert_eq!(page.content.keywords, vec!["focus", "rest"]);
        // 11 + 5 + 4; the date is excluded.
        assert_eq!(page.total_chars, 20);
    }

    #[test]
    fn mismatched_shape_is_ignored() {
        let page = assemble(
            date(),
            &[block(BlockType::Summary, BlockContent::List(vec!["x".into()]))],
        );
        assert!(page.content.summary.is_empty());
    }
}
