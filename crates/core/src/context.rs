//! Personalization context: the resolved strategy for one request.
//!
//! Derived once per (profile, date) by the profile analyzer and then
//! read by every downstream stage. Never mutated after construction.

use crate::profile::Role;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Writing voice used by the block generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Analytical,
    Supportive,
    Formal,
    Casual,
}

/// How much explanation a reader wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    Brief,
    Standard,
    Detailed,
}

/// Trait tags derived from the eight dimensions and their complements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitTag {
    Extraverted,
    Introverted,
    Conscientious,
    Spontaneous,
    OpenMinded,
    Conventional,
    Cooperative,
    Independent,
    Sensitive,
    EmotionallyStable,
    Analytical,
    Intuitive,
    Proactive,
    Reactive,
    DetailOriented,
    BigPicture,
    /// No trait reached the dominance threshold.
    Balanced,
}

/// Behavioral-risk tags inferred from personality thresholds and role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainPoint {
    AnxietyManagement,
    StressResponse,
    Procrastination,
    Organization,
    SocialEnergyDrain,
    BoundarySetting,
    Perfectionism,
    LowInitiative,
    StudyDiscipline,
    ExamPressure,
    WorkplaceStress,
    WorkLifeBalance,
    SelfManagement,
    IncomeUncertainty,
    GeneralWellbeing,
}

impl PainPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            PainPoint::AnxietyManagement => "anxiety_management",
            PainPoint::StressResponse => "stress_response",
            PainPoint::Procrastination => "procrastination",
            PainPoint::Organization => "organization",
            PainPoint::SocialEnergyDrain => "social_energy_drain",
            PainPoint::BoundarySetting => "boundary_setting",
            PainPoint::Perfectionism => "perfectionism",
            PainPoint::LowInitiative => "low_initiative",
            PainPoint::StudyDiscipline => "study_discipline",
            PainPoint::ExamPressure => "exam_pressure",
            PainPoint::WorkplaceStress => "workplace_stress",
            PainPoint::WorkLifeBalance => "work_life_balance",
            PainPoint::SelfManagement => "self_management",
            PainPoint::IncomeUncertainty => "income_uncertainty",
            PainPoint::GeneralWellbeing => "general_wellbeing",
        }
    }
}

impl fmt::Display for PainPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyBucket {
    High,
    Medium,
    Low,
}

impl EnergyBucket {
    pub const ALL: [EnergyBucket; 3] = [EnergyBucket::High, EnergyBucket::Medium, EnergyBucket::Low];

    /// Bucket a 0–100 score: ≥65 high, ≤35 low.
    pub fn from_score(score: f64) -> Self {
        if score >= 65.0 {
            EnergyBucket::High
        } else if score <= 35.0 {
            EnergyBucket::Low
        } else {
            EnergyBucket::Medium
        }
    }

    /// Bucket a 1–5 rhythm level: ≥4 high, ≤2 low.
    pub fn from_level(level: u8) -> Self {
        match level {
            4.. => EnergyBucket::High,
            0..=2 => EnergyBucket::Low,
            _ => EnergyBucket::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyBucket::High => "high",
            EnergyBucket::Medium => "medium",
            EnergyBucket::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Northern-hemisphere calendar lookup.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }
}

/// The resolved personalization strategy for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationContext {
    pub profile_id: String,
    pub date: NaiveDate,
    pub role: Role,
    pub tone: Tone,
    pub depth: Depth,
    /// At most three tags, strongest first, or exactly `[Balanced]`.
    pub dominant_traits: Vec<TraitTag>,
    /// Never empty.
    pub pain_points: Vec<PainPoint>,
    pub energy_bucket: EnergyBucket,
    pub season: Season,
}

impl PersonalizationContext {
    pub fn has_pain_point(&self, pain: PainPoint) -> bool {
        self.pain_points.contains(&pain)
    }

    /// True when any of the given pain points is present.
    pub fn has_any(&self, pains: &[PainPoint]) -> bool {
        pains.iter().any(|p| self.has_pain_point(*p))
    }

    pub fn is_balanced(&self) -> bool {
        self.dominant_traits == [TraitTag::Balanced]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_bucket_thresholds() {
        assert_eq!(EnergyBucket::from_score(65.0), EnergyBucket::High);
        assert_eq!(EnergyBucket::from_score(64.9), EnergyBucket::Medium);
        assert_eq!(EnergyBucket::from_score(35.0), EnergyBucket::Low);
        assert_eq!(EnergyBucket::from_level(5), EnergyBucket::High);
        assert_eq!(EnergyBucket::from_level(3), EnergyBucket::Medium);
        assert_eq!(EnergyBucket::from_level(1), EnergyBucket::Low);
    }

    #[test]
    fn season_by_month() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Autumn);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn pain_point_tags_are_snake_case() {
        let json = serde_json::to_string(&PainPoint::AnxietyManagement).unwrap();
        assert_eq!(json, "\"anxiety_management\"");
        assert_eq!(PainPoint::StudyDiscipline.to_string(), "study_discipline");
    }
}
