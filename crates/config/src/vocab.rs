//! Role vocabulary registry: one immutable [`RoleVocabulary`] per role.
//!
//! Built-in resources are compiled into the binary. A vocabulary directory
//! may override any of them with a `<role>.toml` file; roles without an
//! override keep the built-in copy.

use crate::ConfigError;
use rhythmcard_core::{Role, RoleVocabulary};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const STUDENT_TOML: &str = include_str!("../resources/roles/student.toml");
const OFFICE_WORKER_TOML: &str = include_str!("../resources/roles/office_worker.toml");
const FREELANCER_TOML: &str = include_str!("../resources/roles/freelancer.toml");

fn builtin_source(role: Role) -> &'static str {
    match role {
        Role::Student => STUDENT_TOML,
        Role::OfficeWorker => OFFICE_WORKER_TOML,
        Role::Freelancer => FREELANCER_TOML,
    }
}

/// Read-only lookup of role vocabularies, cheap to clone and share.
#[derive(Debug, Clone)]
pub struct VocabularyRegistry {
    roles: BTreeMap<Role, Arc<RoleVocabulary>>,
}

impl VocabularyRegistry {
    /// The compiled-in vocabularies for all three roles.
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut roles = BTreeMap::new();
        for role in Role::ALL {
            let vocab = parse(builtin_source(role), &format!("<builtin:{role}>"))?;
            roles.insert(role, Arc::new(vocab));
        }
        Ok(Self { roles })
    }

    /// Built-ins overridden by `<dir>/<role>.toml` where present.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::builtin()?;
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "Vocabulary directory not found, using built-in vocabularies");
            return Ok(registry);
        }

        for role in Role::ALL {
            let path = dir.join(format!("{}.toml", role.as_str()));
            if !path.exists() {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            let vocab = parse(&content, &path.display().to_string())?;
            if vocab.role != role {
                return Err(ConfigError::ValidationError(format!(
                    "{} declares role '{}' but is named for '{}'",
                    path.display(),
                    vocab.role,
                    role
                )));
            }
            debug!(file = %path.display(), "Loaded vocabulary override");
            registry.roles.insert(role, Arc::new(vocab));
        }
        Ok(registry)
    }

    /// Build a registry from explicit vocabularies; missing roles get empty ones.
    pub fn from_vocabularies(vocabularies: impl IntoIterator<Item = RoleVocabulary>) -> Self {
        let mut roles: BTreeMap<Role, Arc<RoleVocabulary>> = vocabularies
            .into_iter()
            .map(|v| (v.role, Arc::new(v)))
            .collect();
        for role in Role::ALL {
            roles
                .entry(role)
                .or_insert_with(|| Arc::new(RoleVocabulary::empty(role)));
        }
        Self { roles }
    }

    /// The vocabulary for a role. Every role is always present.
    pub fn get(&self, role: Role) -> Arc<RoleVocabulary> {
        self.roles
            .get(&role)
            .cloned()
            .unwrap_or_else(|| Arc::new(RoleVocabulary::empty(role)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Role, &Arc<RoleVocabulary>)> {
        self.roles.iter()
    }
}

fn parse(content: &str, source: &str) -> Result<RoleVocabulary, ConfigError> {
    let vocab: RoleVocabulary = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: source.into(),
        reason: e.to_string(),
    })?;
    for (from, to) in &vocab.vocabulary_map {
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{source}: vocabulary_map entries must be non-empty"
            )));
        }
    }
    Ok(vocab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn builtin_covers_every_role() {
        let registry = VocabularyRegistry::builtin().unwrap();
        for role in Role::ALL {
            let vocab = registry.get(role);
            assert_eq!(vocab.role, role);
            assert!(!vocab.vocabulary_map.is_empty());
            assert!(!vocab.forbidden_terms.is_empty());
            assert!(vocab.top_action_keywords().len() == 3);
            assert!(!vocab.question_templates.default.is_empty());
        }
    }

    #[test]
    fn builtin_maps_never_emit_own_forbidden_terms() {
        let registry = VocabularyRegistry::builtin().unwrap();
        for role in Role::ALL {
            let vocab = registry.get(role);
            for replacement in vocab.vocabulary_map.values() {
                for term in &vocab.forbidden_terms {
                    assert!(
                        !replacement.to_lowercase().contains(&term.to_lowercase()),
                        "{role}: '{replacement}' contains forbidden '{term}'"
                    );
                }
            }
        }
    }

    #[test]
    fn directory_override_replaces_one_role() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("student.toml"),
            r#"
role = "student"
forbidden_terms = ["pop quiz"]

[vocabulary_map]
"work" = "study"
"#,
        )
        .unwrap();

        let registry = VocabularyRegistry::load_dir(tmp.path()).unwrap();
        let student = registry.get(Role::Student);
        assert_eq!(student.forbidden_terms, vec!["pop quiz"]);
        assert_eq!(student.vocabulary_map.len(), 1);
        // Other roles keep the built-ins.
        assert!(registry.get(Role::Freelancer).vocabulary_map.len() > 1);
    }

    #[test]
    fn mismatched_role_file_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("student.toml"), "role = \"freelancer\"\n").unwrap();
        assert!(VocabularyRegistry::load_dir(tmp.path()).is_err());
    }

    #[test]
    fn missing_directory_uses_builtins() {
        let registry =
            VocabularyRegistry::load_dir(Path::new("/nonexistent/vocab/dir")).unwrap();
        assert!(!registry.get(Role::OfficeWorker).vocabulary_map.is_empty());
    }

    #[test]
    fn from_vocabularies_fills_missing_roles() {
        let registry =
            VocabularyRegistry::from_vocabularies([RoleVocabulary::empty(Role::Student)]);
        assert_eq!(registry.iter().count(), 3);
        assert!(registry.get(Role::Freelancer).vocabulary_map.is_empty());
    }
}
