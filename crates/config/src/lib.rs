//! Configuration loading, validation, and management for rhythmcard.
//!
//! Loads configuration from `~/.rhythmcard/config.toml` with environment
//! variable overrides. Validates all settings at startup. The loaded
//! configuration, the character budget table and the role vocabulary
//! registry are immutable for the life of the process.

mod vocab;

pub use vocab::VocabularyRegistry;

use rhythmcard_core::{BlockType, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.rhythmcard/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Role used when a request does not name one
    #[serde(default)]
    pub default_role: Role,

    /// Directory holding `<role>.toml` vocabulary overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_dir: Option<String>,

    /// Pipeline quality gates
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Forbidden-jargon policy shared by every text-emitting stage
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Character budgets per block and per page
    #[serde(default)]
    pub budget: BudgetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Synthesize a date-seeded signal when the rhythm source fails
    #[serde(default = "default_true")]
    pub use_fallback: bool,

    /// Minimum number of blocks a page must carry
    #[serde(default = "default_min_blocks")]
    pub min_blocks: usize,

    /// Minimum flattened character count of a page
    #[serde(default = "default_min_total_chars")]
    pub min_total_chars: usize,

    /// Allowed relative length change from role translation (0.3 = 30%)
    #[serde(default = "default_max_translation_drift")]
    pub max_translation_drift: f64,

    /// Attach extension sections to generated pages
    #[serde(default = "default_true")]
    pub extensions: bool,
}

fn default_true() -> bool {
    true
}
fn default_min_blocks() -> usize {
    8
}
fn default_min_total_chars() -> usize {
    400
}
fn default_max_translation_drift() -> f64 {
    0.3
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            use_fallback: true,
            min_blocks: default_min_blocks(),
            min_total_chars: default_min_total_chars(),
            max_translation_drift: default_max_translation_drift(),
            extensions: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Bumped whenever the jargon list changes
    #[serde(default = "default_policy_version")]
    pub version: String,

    /// Internal terms that must never reach any reader
    #[serde(default = "default_jargon_terms")]
    pub jargon_terms: Vec<String>,

    /// Generic phrase substituted for jargon found in upstream text
    #[serde(default = "default_replacement")]
    pub replacement: String,
}

fn default_policy_version() -> String {
    "2025.1".into()
}
fn default_replacement() -> String {
    "today's rhythm".into()
}
fn default_jargon_terms() -> Vec<String> {
    [
        "saju",
        "bazi",
        "day master",
        "heavenly stem",
        "earthly branch",
        "ten gods",
        "five elements",
        "four pillars",
        "yongsin",
        "useful god",
        "sipsin",
        "ohaeng",
        "natal chart",
        "element clash",
        "사주",
        "일간",
        "오행",
        "십신",
        "용신",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            version: default_policy_version(),
            jargon_terms: default_jargon_terms(),
            replacement: default_replacement(),
        }
    }
}

/// A `{min, max, target}` character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRange {
    pub min: usize,
    pub max: usize,
    pub target: usize,
}

impl CharRange {
    pub const fn new(min: usize, max: usize, target: usize) -> Self {
        Self { min, max, target }
    }

    pub fn contains(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

/// Built-in per-block budgets.
pub fn default_block_range(block: BlockType) -> CharRange {
    match block {
        BlockType::Summary => CharRange::new(30, 140, 90),
        BlockType::Keywords => CharRange::new(10, 90, 45),
        BlockType::RhythmDescription => CharRange::new(200, 480, 320),
        BlockType::FocusCaution => CharRange::new(40, 260, 150),
        BlockType::ActionGuide => CharRange::new(40, 260, 150),
        BlockType::TimeDirection => CharRange::new(30, 220, 120),
        BlockType::StateTrigger => CharRange::new(40, 240, 140),
        BlockType::MeaningShift => CharRange::new(60, 280, 170),
        BlockType::RhythmQuestion => CharRange::new(15, 140, 70),
    }
}

fn default_page_range() -> CharRange {
    CharRange::new(400, 1200, 1000)
}

/// Character budget configuration.
///
/// `blocks` only needs the entries that differ from the built-in table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default)]
    pub blocks: BTreeMap<String, CharRange>,

    #[serde(default = "default_page_range")]
    pub page: CharRange,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            blocks: BTreeMap::new(),
            page: default_page_range(),
        }
    }
}

impl BudgetConfig {
    /// The effective range for a block: override if configured, else built-in.
    pub fn range_for(&self, block: BlockType) -> CharRange {
        self.blocks
            .get(block.key())
            .copied()
            .unwrap_or_else(|| default_block_range(block))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for key in self.blocks.keys() {
            if key.parse::<BlockType>().is_err() {
                return Err(ConfigError::ValidationError(format!(
                    "budget.blocks has unknown block type '{key}'"
                )));
            }
        }
        let ranges = BlockType::ALL
            .into_iter()
            .map(|b| (b.key(), self.range_for(b)))
            .chain(std::iter::once(("page", self.page)));
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(ConfigError::ValidationError(format!(
                    "budget for '{name}' has min {} > max {}",
                    range.min, range.max
                )));
            }
            if !range.contains(range.target) {
                return Err(ConfigError::ValidationError(format!(
                    "budget target for '{name}' ({}) is outside {}–{}",
                    range.target, range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.rhythmcard/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `RHYTHMCARD_DEFAULT_ROLE`
    /// - `RHYTHMCARD_VOCABULARY_DIR`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(role) = std::env::var("RHYTHMCARD_DEFAULT_ROLE") {
            config.default_role = Role::parse_or_default(&role);
        }

        if let Ok(dir) = std::env::var("RHYTHMCARD_VOCABULARY_DIR") {
            config.vocabulary_dir = Some(dir);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".rhythmcard")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let drift = self.pipeline.max_translation_drift;
        if !(drift > 0.0 && drift <= 1.0) {
            return Err(ConfigError::ValidationError(
                "pipeline.max_translation_drift must be in (0.0, 1.0]".into(),
            ));
        }

        if self.safety.replacement.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "safety.replacement must not be empty".into(),
            ));
        }

        if self
            .safety
            .jargon_terms
            .iter()
            .any(|t| t.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(
                "safety.jargon_terms must not contain blank entries".into(),
            ));
        }

        self.budget.validate()
    }

    /// Load the role vocabulary registry this configuration points at.
    pub fn vocabulary(&self) -> Result<VocabularyRegistry, ConfigError> {
        match &self.vocabulary_dir {
            Some(dir) => VocabularyRegistry::load_dir(Path::new(dir)),
            None => VocabularyRegistry::builtin(),
        }
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_role: Role::default(),
            vocabulary_dir: None,
            pipeline: PipelineConfig::default(),
            safety: SafetyConfig::default(),
            budget: BudgetConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for rhythmcard_core::Error {
    fn from(e: ConfigError) -> Self {
        rhythmcard_core::Error::Config {
            message: e.to_string(),
        }
    }
}
