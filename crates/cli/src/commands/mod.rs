pub mod batch;
pub mod check_block;
pub mod config_cmd;
pub mod generate;
pub mod init;
pub mod vocab;

use chrono::NaiveDate;
use rhythmcard_config::AppConfig;
use rhythmcard_core::{Profile, RhythmSource, Role};
use rhythmcard_pipeline::{ContentPipeline, FallbackRhythm, JsonRhythmSource};
use std::path::{Path, PathBuf};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Read a profile JSON file. A profile without a `role` gets `default_role`.
pub fn load_profile(path: &Path, default_role: Role) -> Result<Profile, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read profile {}: {e}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse profile {}: {e}", path.display()))?;
    if let Some(fields) = value.as_object_mut() {
        fields
            .entry("role")
            .or_insert_with(|| serde_json::Value::String(default_role.as_str().to_string()));
    }
    let profile: Profile = serde_json::from_value(value)
        .map_err(|e| format!("Invalid profile {}: {e}", path.display()))?;
    Ok(profile)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{raw}' (expected YYYY-MM-DD): {e}").into())
}

/// Explicit role if given (unknown names fall back with a warning), else the profile's.
pub fn effective_role(requested: Option<&str>, profile: &Profile) -> Role {
    requested.map_or(profile.role, Role::parse_or_default)
}

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

pub fn build_pipeline(
    config: AppConfig,
    rhythm: Option<PathBuf>,
) -> Result<ContentPipeline, Box<dyn std::error::Error>> {
    let source: Box<dyn RhythmSource> = match rhythm {
        Some(path) => Box::new(JsonRhythmSource::from_path(&path)?),
        None => Box::new(FallbackRhythm),
    };
    Ok(ContentPipeline::from_config(config, source)?)
}
