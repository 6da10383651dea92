//! `rhythmcard vocab`: show the loaded role vocabularies.

use super::CmdResult;
use rhythmcard_config::AppConfig;
use rhythmcard_core::{Role, RoleVocabulary};

pub fn run(role: Option<String>) -> CmdResult {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let registry = config.vocabulary()?;

    let roles: Vec<Role> = match role {
        Some(name) => vec![name.parse()?],
        None => Role::ALL.to_vec(),
    };
    for role in roles {
        print_vocabulary(&registry.get(role));
    }
    Ok(())
}

fn print_vocabulary(vocab: &RoleVocabulary) {
    println!("📖 {}", vocab.role);
    println!("  Tone:        {}", vocab.tone_preference);
    println!("  Time focus:  {}", vocab.time_focus);
    println!("  Emphasis:    {}", vocab.emphasis_areas.join(", "));
    println!("  Avoid:       {}", vocab.de_emphasis_areas.join(", "));
    println!("  Forbidden:   {}", vocab.forbidden_terms.join(", "));
    println!("  Actions:     {}", vocab.action_keywords.join(", "));
    println!("  Phrases:     {}", vocab.vocabulary_map.len());
    for (from, to) in vocab.sorted_entries() {
        println!("    {from:<20} → {to}");
    }
    println!();
}
