//! Safety findings: structured records of jargon scrubbed or forbidden terms found.

use serde::{Deserialize, Serialize};

/// What the policy did when it met a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Upstream text was rewritten before use.
    Scrubbed,
    /// User-facing text still carries a forbidden term.
    Forbidden,
}

/// A single safety finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// The configured term that matched (as configured, not as written).
    pub term: String,
    /// Short excerpt around the match, for reports.
    pub excerpt: String,
    /// Policy version that produced the finding.
    pub policy_version: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            FindingKind::Scrubbed => "scrubbed jargon",
            FindingKind::Forbidden => "forbidden term",
        };
        write!(f, "{label} '{}' in \"{}\"", self.term, self.excerpt)
    }
}

/// Emit findings through `tracing`. Forbidden hits warn, scrubs are debug.
pub fn log_findings(findings: &[Finding], stage: &str) {
    for finding in findings {
        match finding.kind {
            FindingKind::Forbidden => tracing::warn!(
                stage,
                term = %finding.term,
                excerpt = %finding.excerpt,
                policy = %finding.policy_version,
                "Forbidden term in user-facing text"
            ),
            FindingKind::Scrubbed => tracing::debug!(
                stage,
                term = %finding.term,
                policy = %finding.policy_version,
                "Scrubbed jargon from upstream text"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_display_names_term() {
        let finding = Finding {
            kind: FindingKind::Forbidden,
            term: "day master".into(),
            excerpt: "your day master is".into(),
            policy_version: "v1".into(),
        };
        let text = finding.to_string();
        assert!(text.contains("day master"));
        assert!(text.contains("your day master is"));
    }

    #[test]
    fn finding_display_follows_kind() {
        let finding = Finding {
            kind: FindingKind::Scrubbed,
            term: "saju".into(),
            excerpt: "today's saju reading".into(),
            policy_version: "v1".into(),
        };
        let text = finding.to_string();
        assert!(text.starts_with("scrubbed jargon 'saju'"));
        assert!(!text.contains("forbidden"));
    }

    #[test]
    fn finding_serializes_kind_snake_case() {
        let json = serde_json::to_value(FindingKind::Scrubbed).unwrap();
        assert_eq!(json, "scrubbed");
    }
}
