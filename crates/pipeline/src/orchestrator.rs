//! ContentPipeline: runs one (profile, date, role) request end to end.
//!
//! Only an invalid profile is an `Err`. Quality problems come back as
//! issues on a successful outcome; an internal fault comes back as
//! `success = false` with no content.

use crate::extensions;
use crate::quality::QualityScores;
use crate::sources::FallbackRhythm;
use chrono::NaiveDate;
use rhythmcard_config::{AppConfig, VocabularyRegistry};
use rhythmcard_content::{CharBudget, GenerationInput, GeneratorRegistry, assemble, default_registry};
use rhythmcard_core::{
    ContentBlock, Error, Page, PersonalizationContext, Profile, Result, RhythmSignal, RhythmSource,
    Role, TextFields,
};
use rhythmcard_persona::{analyze_as, map_decisions};
use rhythmcard_safety::{SafetyPolicy, log_findings};
use rhythmcard_translator::{RoleTranslator, TranslationIssue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ── Outcome types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TooFewBlocks,
    TooShort,
    ForbiddenTerm,
    Budget,
    Translation,
}

/// A soft quality problem. The page is still delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineIssue {
    pub kind: IssueKind,
    pub message: String,
}

impl PipelineIssue {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PipelineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub success: bool,
    pub date: NaiveDate,
    pub role: Role,
    pub content: Option<Page>,
    pub blocks: Vec<ContentBlock>,
    pub total_chars: usize,
    pub quality: Option<QualityScores>,
    pub used_fallback: bool,
    pub issues: Vec<PipelineIssue>,
    pub errors: Vec<String>,
}

impl GenerationOutcome {
    fn fault(date: NaiveDate, role: Role, error: &Error) -> Self {
        Self {
            success: false,
            date,
            role,
            content: None,
            blocks: Vec::new(),
            total_chars: 0,
            quality: None,
            used_fallback: false,
            issues: Vec::new(),
            errors: vec![error.to_string()],
        }
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayResult {
    pub date: NaiveDate,
    pub success: bool,
    pub total_chars: usize,
    pub issues: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub days: Vec<DayResult>,
    #[serde(skip)]
    pub outcomes: Vec<GenerationOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

// ── Pipeline ────────────────────────────────────────────────────────────

pub struct ContentPipeline {
    config: Arc<AppConfig>,
    policy: Arc<SafetyPolicy>,
    translators: BTreeMap<Role, RoleTranslator>,
    source: Box<dyn RhythmSource>,
    fallback: FallbackRhythm,
    generators: GeneratorRegistry,
    budget: CharBudget,
}

impl ContentPipeline {
    /// Build a pipeline from configuration, loading vocabularies as configured.
    pub fn from_config(config: AppConfig, source: Box<dyn RhythmSource>) -> Result<Self> {
        let vocabularies = config.vocabulary()?;
        Self::new(config, vocabularies, source)
    }

    pub fn new(
        config: AppConfig,
        vocabularies: VocabularyRegistry,
        source: Box<dyn RhythmSource>,
    ) -> Result<Self> {
        config.validate()?;
        let policy = Arc::new(SafetyPolicy::from_config(&config.safety)?);

        let mut translators = BTreeMap::new();
        for role in Role::ALL {
            let translator = RoleTranslator::new(
                vocabularies.get(role),
                Arc::clone(&policy),
                config.pipeline.max_translation_drift,
            )?;
            translators.insert(role, translator);
        }

        info!(
            source = source.name(),
            policy = policy.version(),
            fallback = config.pipeline.use_fallback,
            "Content pipeline ready"
        );

        Ok(Self {
            budget: CharBudget::new(config.budget.clone()),
            config: Arc::new(config),
            policy,
            translators,
            source,
            fallback: FallbackRhythm,
            generators: default_registry(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn budget(&self) -> &CharBudget {
        &self.budget
    }

    /// Generate one day's page for `role`.
    ///
    /// `Err` only for an invalid profile.
    pub fn generate(&self, profile: &Profile, date: NaiveDate, role: Role) -> Result<GenerationOutcome> {
        profile.validate()?;
        match self.run(profile, date, role) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(profile = %profile.id, %date, error = %e, "Generation failed");
                Ok(GenerationOutcome::fault(date, role, &e))
            }
        }
    }

    /// Generate every day in `start..=end`. Days are independent.
    pub fn generate_batch(
        &self,
        profile: &Profile,
        start: NaiveDate,
        end: NaiveDate,
        role: Role,
    ) -> Result<BatchReport> {
        profile.validate()?;
        let mut report = BatchReport::default();

        for date in start.iter_days().take_while(|d| *d <= end) {
            let outcome = self.generate(profile, date, role)?;
            if outcome.success {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }
            report.days.push(DayResult {
                date,
                success: outcome.success,
                total_chars: outcome.total_chars,
                issues: outcome.issues.len(),
                errors: outcome.errors.clone(),
            });
            report.outcomes.push(outcome);
        }

        info!(
            profile = %profile.id,
            %start,
            %end,
            succeeded = report.succeeded,
            failed = report.failed,
            "Batch complete"
        );
        Ok(report)
    }

    fn translator(&self, role: Role) -> Result<&RoleTranslator> {
        self.translators
            .get(&role)
            .ok_or_else(|| Error::Internal(format!("no translator for role {role}")))
    }

    fn run(&self, profile: &Profile, date: NaiveDate, role: Role) -> Result<GenerationOutcome> {
        let translator = self.translator(role)?;
        let context = analyze_as(profile, date, role);
        let (signal, used_fallback) = self.rhythm(&profile.id, date, translator)?;
        let decisions = map_decisions(&context, profile);

        let input = GenerationInput {
            context: &context,
            profile,
            signal: &signal,
            decisions: &decisions,
        };
        let blocks = self.generators.generate_all(&input);
        let assembled = assemble(date, &blocks);

        let page = Page {
            content: assembled.content,
            extensions: if self.config.pipeline.extensions {
                extensions::build(&context, profile)
            } else {
                Default::default()
            },
        };

        let translation = translator.translate_page(&page);
        let total_chars = translation.page.content.char_len();
        let quality = QualityScores::compute(&blocks, &context, profile, translation.alignment_score);

        // Forbidden hits are reported once, by the final sweep in `validate`.
        let mut issues: Vec<PipelineIssue> = translation
            .issues
            .iter()
            .filter(|i| !matches!(i, TranslationIssue::ForbiddenTerm { .. }))
            .map(|i| PipelineIssue::new(IssueKind::Translation, i.to_string()))
            .collect();
        issues.extend(self.validate(&blocks, &translation.page, total_chars, translator));

        log_outcome(&context, total_chars, &quality, &issues, used_fallback);

        Ok(GenerationOutcome {
            success: true,
            date,
            role,
            content: Some(translation.page),
            blocks,
            total_chars,
            quality: Some(quality),
            used_fallback,
            issues,
            errors: Vec::new(),
        })
    }

    /// Fetch the day's signal, falling back when the source fails, then
    /// scrub jargon and adapt wording to the role.
    fn rhythm(
        &self,
        profile_id: &str,
        date: NaiveDate,
        translator: &RoleTranslator,
    ) -> Result<(RhythmSignal, bool)> {
        let (raw, used_fallback) = match self.source.fetch(profile_id, date) {
            Ok(signal) => (signal, false),
            Err(e) if self.config.pipeline.use_fallback => {
                warn!(source = self.source.name(), %date, error = %e, "Rhythm source failed, using fallback");
                (self.fallback.signal_for(date), true)
            }
            Err(e) => return Err(e.into()),
        };

        let (scrubbed, findings) = self.policy.scrub_signal(raw.clamped());
        log_findings(&findings, "rhythm");
        let adapted = scrubbed.map_text(|text| translator.translate_text(text));
        Ok((adapted, used_fallback))
    }

    fn validate(
        &self,
        blocks: &[ContentBlock],
        page: &Page,
        total_chars: usize,
        translator: &RoleTranslator,
    ) -> Vec<PipelineIssue> {
        let settings = &self.config.pipeline;
        let mut issues = Vec::new();

        if blocks.len() < settings.min_blocks {
            issues.push(PipelineIssue::new(
                IssueKind::TooFewBlocks,
                format!("{} blocks generated, need at least {}", blocks.len(), settings.min_blocks),
            ));
        }
        if total_chars < settings.min_total_chars {
            issues.push(PipelineIssue::new(
                IssueKind::TooShort,
                format!("{total_chars} characters, need at least {}", settings.min_total_chars),
            ));
        }

        let findings = self.policy.sweep(page, translator.forbidden_matcher());
        issues.extend(
            findings
                .iter()
                .map(|f| PipelineIssue::new(IssueKind::ForbiddenTerm, f.to_string())),
        );

        let report = self.budget.validate_page(&page.content);
        issues.extend(
            report
                .issues()
                .into_iter()
                .map(|m| PipelineIssue::new(IssueKind::Budget, m)),
        );
        issues
    }
}

fn log_outcome(
    context: &PersonalizationContext,
    total_chars: usize,
    quality: &QualityScores,
    issues: &[PipelineIssue],
    used_fallback: bool,
) {
    if issues.is_empty() {
        info!(
            profile = %context.profile_id,
            date = %context.date,
            role = %context.role,
            total_chars,
            personalization = quality.personalization,
            used_fallback,
            "Daily content generated"
        );
    } else {
        info!(
            profile = %context.profile_id,
            date = %context.date,
            role = %context.role,
            total_chars,
            issues = issues.len(),
            used_fallback,
            "Daily content generated with issues"
        );
        for issue in issues {
            debug!(kind = ?issue.kind, message = %issue.message, "Quality issue");
        }
    }
}
