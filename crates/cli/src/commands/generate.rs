//! `rhythmcard generate`: one day's page as JSON.

use super::{CmdResult, build_pipeline, effective_role, load_config, load_profile, parse_date};
use std::path::{Path, PathBuf};

pub fn run(
    profile_path: &Path,
    date: Option<String>,
    role: Option<String>,
    rhythm: Option<PathBuf>,
    report: bool,
) -> CmdResult {
    let config = load_config()?;
    let profile = load_profile(profile_path, config.default_role)?;
    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => chrono::Local::now().date_naive(),
    };
    let role = effective_role(role.as_deref(), &profile);
    let pipeline = build_pipeline(config, rhythm)?;
    tracing::info!(profile = %profile.id, %date, %role, "Generating page");

    let outcome = pipeline.generate(&profile, date, role)?;
    if !outcome.success {
        return Err(format!("Generation failed: {}", outcome.errors.join("; ")).into());
    }

    if report {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if let Some(page) = &outcome.content {
        println!("{}", serde_json::to_string_pretty(page)?);
    }

    for issue in &outcome.issues {
        eprintln!("⚠️  {issue}");
    }
    Ok(())
}
