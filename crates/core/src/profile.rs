//! User profile: the read-only input describing who the content is for.
//!
//! Profiles are created by an external profile-management collaborator.
//! This crate only validates them and reads from them.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Maximum number of primary interests a profile may declare.
pub const MAX_PRIMARY_INTERESTS: usize = 5;

/// The closed set of personas the pipeline writes for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    #[default]
    #[serde(alias = "office-worker")]
    OfficeWorker,
    Freelancer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::OfficeWorker, Role::Freelancer];

    /// Stable snake_case key, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::OfficeWorker => "office_worker",
            Role::Freelancer => "freelancer",
        }
    }

    /// Parse a role name, falling back to the default role for unknown input.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(role = s, "Unknown role, using default");
            Role::default()
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "student" => Ok(Role::Student),
            "office_worker" | "office" | "worker" => Ok(Role::OfficeWorker),
            "freelancer" | "freelance" => Ok(Role::Freelancer),
            _ => Err(ProfileError::UnknownRole(s.to_string())),
        }
    }
}

/// Eight normalized personality dimensions, each on a 0–100 scale.
///
/// The last three are bipolar axes; the field scores the first pole
/// (analytical, proactive, detail-oriented). Missing dimensions read as 50.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub extraversion: f64,
    pub conscientiousness: f64,
    pub openness: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
    #[serde(alias = "analytical_vs_intuitive")]
    pub analytical: f64,
    #[serde(alias = "proactive_vs_reactive")]
    pub proactive: f64,
    #[serde(alias = "detail_vs_big_picture")]
    pub detail_oriented: f64,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            extraversion: 50.0,
            conscientiousness: 50.0,
            openness: 50.0,
            agreeableness: 50.0,
            neuroticism: 50.0,
            analytical: 50.0,
            proactive: 50.0,
            detail_oriented: 50.0,
        }
    }
}

impl Personality {
    /// All dimensions with their stable names, in declaration order.
    pub fn dimensions(&self) -> [(&'static str, f64); 8] {
        [
            ("extraversion", self.extraversion),
            ("conscientiousness", self.conscientiousness),
            ("openness", self.openness),
            ("agreeableness", self.agreeableness),
            ("neuroticism", self.neuroticism),
            ("analytical", self.analytical),
            ("proactive", self.proactive),
            ("detail_oriented", self.detail_oriented),
        ]
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        for (dimension, value) in self.dimensions() {
            if !value.is_finite() {
                return Err(ProfileError::DimensionNotFinite { dimension });
            }
            if !(0.0..=100.0).contains(&value) {
                return Err(ProfileError::DimensionOutOfRange { dimension, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interests {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<String>,
}

impl Interests {
    pub fn total(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }
}

/// A user profile as handed over by the profile-management collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub personality: Personality,

    #[serde(default)]
    pub interests: Interests,

    /// Activity category → chosen activities (e.g. "exercise" → ["running"]).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub activities: BTreeMap<String, Vec<String>>,
}

impl Profile {
    pub fn new(id: impl Into<String>, role: Role, personality: Personality) -> Self {
        Self {
            id: id.into(),
            role,
            personality,
            interests: Interests::default(),
            activities: BTreeMap::new(),
        }
    }

    /// Check every invariant the pipeline relies on.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.id.trim().is_empty() {
            return Err(ProfileError::EmptyId);
        }
        self.personality.validate()?;
        if self.interests.primary.len() > MAX_PRIMARY_INTERESTS {
            return Err(ProfileError::TooManyPrimaryInterests {
                count: self.interests.primary.len(),
                max: MAX_PRIMARY_INTERESTS,
            });
        }
        Ok(())
    }

    /// First primary interest, trimmed, if any.
    pub fn primary_interest(&self) -> Option<&str> {
        self.interests
            .primary
            .iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_common_spellings() {
        assert_eq!("office-worker".parse::<Role>().unwrap(), Role::OfficeWorker);
        assert_eq!("Office_Worker".parse::<Role>().unwrap(), Role::OfficeWorker);
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert!("astronaut".parse::<Role>().is_err());
    }

    #[test]
    fn unknown_role_falls_back_to_default() {
        assert_eq!(Role::parse_or_default("astronaut"), Role::OfficeWorker);
    }

    #[test]
    fn role_serde_accepts_hyphenated_alias() {
        let role: Role = serde_json::from_str("\"office-worker\"").unwrap();
        assert_eq!(role, Role::OfficeWorker);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"office_worker\"");
    }

    #[test]
    fn out_of_range_dimension_rejected() {
        let profile = Profile::new(
            "u1",
            Role::Student,
            Personality {
                openness: 101.0,
                ..Personality::default()
            },
        );
        assert_eq!(
            profile.validate(),
            Err(ProfileError::DimensionOutOfRange {
                dimension: "openness",
                value: 101.0
            })
        );
    }

    #[test]
    fn nan_dimension_rejected() {
        let profile = Profile::new(
            "u1",
            Role::Student,
            Personality {
                neuroticism: f64::NAN,
                ..Personality::default()
            },
        );
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::DimensionNotFinite { dimension: "neuroticism" })
        ));
    }

    #[test]
    fn too_many_primary_interests_rejected() {
        let mut profile = Profile::new("u1", Role::Freelancer, Personality::default());
        profile.interests.primary = (0..6).map(|i| format!("interest {i}")).collect();
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::TooManyPrimaryInterests { count: 6, .. })
        ));
    }

    #[test]
    fn empty_id_rejected() {
        let profile = Profile::new("  ", Role::Student, Personality::default());
        assert_eq!(profile.validate(), Err(ProfileError::EmptyId));
    }

    #[test]
    fn profile_json_with_aliases() {
        let json = r#"{
            "id": "p-1",
            "role": "freelancer",
            "personality": {
                "extraversion": 40, "conscientiousness": 70, "openness": 80,
                "agreeableness": 55, "neuroticism": 20,
                "analytical_vs_intuitive": 30, "proactive_vs_reactive": 75,
                "detail_vs_big_picture": 45
            },
            "interests": { "primary": [" Photography ", "hiking"] },
            "activities": { "exercise": ["running"] }
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.personality.proactive, 75.0);
        assert_eq!(profile.primary_interest(), Some("Photography"));
        assert_eq!(profile.activities["exercise"], vec!["running"]);
    }
}
