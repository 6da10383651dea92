//! `rhythmcard check-block`: measure a text against a block budget.

use super::CmdResult;
use rhythmcard_config::AppConfig;
use rhythmcard_content::CharBudget;
use rhythmcard_core::BlockType;

pub fn run(block: &str, text: &str) -> CmdResult {
    let block: BlockType = block.parse()?;
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let result = CharBudget::new(config.budget).validate_block(block, text);

    println!("{}", serde_json::to_string_pretty(&result)?);
    if result.valid {
        println!("✅ {block}: {} characters ({})", result.actual, result.suggestion);
    } else {
        println!(
            "❌ {block}: {} characters, expected {}–{} ({})",
            result.actual, result.min, result.max, result.suggestion
        );
    }
    Ok(())
}
