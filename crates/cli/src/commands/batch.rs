//! `rhythmcard batch`: a page per day over a date range.

use super::{CmdResult, build_pipeline, effective_role, load_config, load_profile, parse_date};
use std::path::{Path, PathBuf};

pub fn run(
    profile_path: &Path,
    start: &str,
    end: &str,
    role: Option<String>,
    rhythm: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> CmdResult {
    let config = load_config()?;
    let profile = load_profile(profile_path, config.default_role)?;
    let (start, end) = (parse_date(start)?, parse_date(end)?);
    if end < start {
        return Err(format!("End date {end} is before start date {start}").into());
    }
    let role = effective_role(role.as_deref(), &profile);
    let pipeline = build_pipeline(config, rhythm)?;

    let report = pipeline.generate_batch(&profile, start, end, role)?;

    if let Some(dir) = &out_dir {
        std::fs::create_dir_all(dir)?;
        for outcome in &report.outcomes {
            if let Some(page) = &outcome.content {
                let path = dir.join(format!("{}.json", outcome.date));
                std::fs::write(&path, serde_json::to_string_pretty(page)?)?;
                tracing::debug!(path = %path.display(), "Wrote page");
            }
        }
    }

    println!("📅 Batch {start} → {end} ({role})");
    for day in &report.days {
        let mark = if day.success { "✅" } else { "❌" };
        println!(
            "  {mark} {}  {:>5} chars  {} issue(s)",
            day.date, day.total_chars, day.issues
        );
        for error in &day.errors {
            println!("       {error}");
        }
    }
    println!();
    println!(
        "  {} succeeded, {} failed",
        report.succeeded, report.failed
    );
    if let Some(dir) = out_dir {
        println!("  Pages written to {}", dir.display());
    }
    Ok(())
}
