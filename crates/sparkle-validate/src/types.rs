//! Issue model

use serde::{Deserialize, Serialize};
use sparkle_core::PrimPath;
use std::fmt;

/// Severity level for validation issues. `Error` is the most severe and sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding on one prim
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    path: PrimPath,
    message: String,
    severity: Severity,
    rule_id: String,
    fix_description: Option<String>,
}

impl Issue {
    pub fn new(
        path: PrimPath,
        message: impl Into<String>,
        severity: Severity,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            path,
            message: message.into(),
            severity,
            rule_id: rule_id.into(),
            fix_description: None,
        }
    }

    /// Attach a suggested fix
    pub fn with_fix(mut self, description: impl Into<String>) -> Self {
        self.fix_description = Some(description.into());
        self
    }

    pub fn path(&self) -> &PrimPath {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn fix_description(&self) -> Option<&str> {
        self.fix_description.as_deref()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] at {}: {}",
            self.severity, self.rule_id, self.path, self.message
        )?;
        if let Some(fix) = &self.fix_description {
            write!(f, "\n  Suggested fix: {}", fix)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> Issue {
        Issue::new(
            PrimPath::parse("/World/Carrot").unwrap(),
            "Current health (150.0) exceeds maximum health (100.0)",
            Severity::Error,
            "HEALTH_COMP_001",
        )
    }

    #[test]
    fn test_issue_display_without_fix() {
        assert_eq!(
            issue().to_string(),
            "ERROR [HEALTH_COMP_001] at /World/Carrot: \
             Current health (150.0) exceeds maximum health (100.0)"
        );
    }

    #[test]
    fn test_issue_display_with_fix() {
        let text = issue().with_fix("Lower current health").to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "  Suggested fix: Lower current health");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert_eq!(Severity::ALL.iter().min(), Some(&Severity::Error));
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"WARNING\"");
        let parsed: Severity = serde_json::from_str("\"INFO\"").unwrap();
        assert_eq!(parsed, Severity::Info);
        assert!(serde_json::from_str::<Severity>("\"error\"").is_err());
    }
}
