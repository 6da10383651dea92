//! `rhythmcard config`: Configuration management commands.

use super::CmdResult;
use rhythmcard_config::AppConfig;

pub fn validate() -> CmdResult {
    println!("🔍 Validating configuration...");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    };
    println!("   ✅ Config parsed and validated");

    match config.vocabulary() {
        Ok(registry) => {
            for (role, vocab) in registry.iter() {
                println!(
                    "   ✅ {role}: {} phrases, {} forbidden terms",
                    vocab.vocabulary_map.len(),
                    vocab.forbidden_terms.len()
                );
            }
        }
        Err(e) => {
            println!("   ❌ Vocabulary error: {e}");
            return Err(e.into());
        }
    }

    println!();
    println!("   Default role:    {}", config.default_role);
    println!("   Safety policy:   {}", config.safety.version);
    println!("   Jargon terms:    {}", config.safety.jargon_terms.len());
    println!(
        "   Page budget:     {}–{} (target {})",
        config.budget.page.min, config.budget.page.max, config.budget.page.target
    );
    println!(
        "   Fallback rhythm: {}",
        if config.pipeline.use_fallback { "enabled" } else { "disabled" }
    );
    Ok(())
}

pub fn show() -> CmdResult {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> CmdResult {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = rhythmcard_config::AppConfig::config_dir().join("config.toml");
        assert!(path.to_str().unwrap().contains("config.toml"));
    }
}
