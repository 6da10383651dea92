//! rhythmcard CLI: the main entry point.
//!
//! Commands:
//! - `generate`: One day's page for a profile
//! - `batch`: A page per day over a date range
//! - `check-block`: Check a text against a block's character budget
//! - `vocab`: Show a role's vocabulary resource
//! - `init`: Write a default config file
//! - `config`: Validate, show, or locate the config

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "rhythmcard",
    about = "Personalized daily rhythm pages",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one day's page
    Generate {
        /// Profile JSON file
        #[arg(short, long)]
        profile: PathBuf,

        /// Date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Role to write for; defaults to the profile's role
        #[arg(short, long)]
        role: Option<String>,

        /// Date-keyed rhythm signal JSON; the deterministic fallback is used without it
        #[arg(long)]
        rhythm: Option<PathBuf>,

        /// Print the full outcome (blocks, scores, issues) instead of just the page
        #[arg(long)]
        report: bool,
    },

    /// Generate a page for every day in a range
    Batch {
        #[arg(short, long)]
        profile: PathBuf,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        #[arg(short, long)]
        role: Option<String>,

        #[arg(long)]
        rhythm: Option<PathBuf>,

        /// Write one `<date>.json` page per day into this directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Check a text against a block's character budget
    CheckBlock {
        /// Block key, e.g. `summary` or `rhythm_description`
        block: String,

        /// The text to measure
        text: String,
    },

    /// Show the vocabulary resource for one role or all roles
    Vocab {
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Write a default config file
    Init,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate the config file
    Validate,
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            profile,
            date,
            role,
            rhythm,
            report,
        } => commands::generate::run(&profile, date, role, rhythm, report)?,
        Commands::Batch {
            profile,
            start,
            end,
            role,
            rhythm,
            out_dir,
        } => commands::batch::run(&profile, &start, &end, role, rhythm, out_dir)?,
        Commands::CheckBlock { block, text } => commands::check_block::run(&block, &text)?,
        Commands::Vocab { role } => commands::vocab::run(role)?,
        Commands::Init => commands::init::run()?,
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate()?,
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path()?,
        },
    }

    Ok(())
}
