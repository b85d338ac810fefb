//! Persisted validation report
//!
//! The JSON layout is consumed by CI tooling: field names and order are fixed
//! and new fields may only be added.

use crate::types::{Issue, Severity};
use crate::validator::SeverityCounts;
use serde::{Deserialize, Serialize};
use sparkle_core::{Result, SparkleError};
use std::fs;
use std::path::Path;

/// Issue counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub total: usize,
}

/// One issue as written to the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportIssue {
    pub path: String,
    pub message: String,
    pub severity: Severity,
    pub rule_id: String,
    pub fix_description: Option<String>,
}

impl From<SeverityCounts> for ReportSummary {
    fn from(counts: SeverityCounts) -> Self {
        Self {
            errors: counts.errors,
            warnings: counts.warnings,
            info: counts.info,
            total: counts.total(),
        }
    }
}

impl From<&Issue> for ReportIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            path: issue.path().to_string(),
            message: issue.message().to_string(),
            severity: issue.severity(),
            rule_id: issue.rule_id().to_string(),
            fix_description: issue.fix_description().map(str::to_string),
        }
    }
}

/// A complete validation report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub summary: ReportSummary,
    pub issues: Vec<ReportIssue>,
}

impl ValidationReport {
    /// Build a report from issues in run order
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let mut counts = SeverityCounts::default();
        let issues: Vec<ReportIssue> = issues
            .into_iter()
            .inspect(|issue| counts.record(issue.severity()))
            .map(ReportIssue::from)
            .collect();
        Self {
            summary: counts.into(),
            issues,
        }
    }

    /// Check if the run passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.summary.errors == 0
    }

    /// Pretty JSON with two-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| SparkleError::ReportError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SparkleError::ReportError(format!("Failed to parse report: {}", e)))
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SparkleError::FileNotFound(path.display().to_string()));
        }
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkle_core::PrimPath;

    fn sample_issues() -> Vec<Issue> {
        vec![
            Issue::new(
                PrimPath::parse("/World/Carrot").unwrap(),
                "Current health (150.0) exceeds maximum health (100.0)",
                Severity::Error,
                "HEALTH_COMP_001",
            )
            .with_fix("Reduce current health to be less than or equal to maximum health"),
            Issue::new(
                PrimPath::parse("/World/Player").unwrap(),
                "Movement component missing required attribute 'sparkle:movement:pattern'",
                Severity::Warning,
                "MOVEMENT_COMP_001",
            ),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let report = ValidationReport::from_issues(&sample_issues());
        assert_eq!(
            report.summary,
            ReportSummary {
                errors: 1,
                warnings: 1,
                info: 0,
                total: 2
            }
        );
        assert!(!report.is_valid());
        assert!(ValidationReport::from_issues(&Vec::<Issue>::new()).is_valid());
    }

    #[test]
    fn test_summary_matches_run_counts() {
        let mut counts = SeverityCounts::default();
        for issue in sample_issues() {
            counts.record(issue.severity());
        }
        let report = ValidationReport::from_issues(&sample_issues());
        assert_eq!(report.summary, ReportSummary::from(counts));
        assert_eq!(report.summary.total, report.issues.len());
    }

    #[test]
    fn test_json_layout() {
        let json = ValidationReport::from_issues(&sample_issues()).to_json().unwrap();
        assert!(json.starts_with("{\n  \"summary\": {\n    \"errors\": 1,"));
        assert!(json.ends_with("}\n"));

        let summary = json.find("\"summary\"").unwrap();
        let issues = json.find("\"issues\"").unwrap();
        assert!(summary < issues);

        let keys = [
            "\"path\"",
            "\"message\"",
            "\"severity\"",
            "\"rule_id\"",
            "\"fix_description\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(json.contains("\"severity\": \"ERROR\""));
        assert!(json.contains("\"fix_description\": null"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = ValidationReport::from_issues(&sample_issues());
        report.write(&path).unwrap();

        let loaded = ValidationReport::read(&path).unwrap();
        assert_eq!(loaded.summary, report.summary);
        assert_eq!(loaded.issues.len(), report.issues.len());
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_writes_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        let report = ValidationReport::from_issues(&sample_issues());
        report.write(&first).unwrap();
        report.write(&second).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_bad_json() {
        let err = ValidationReport::from_json("{\"summary\": 3}").unwrap_err();
        assert!(matches!(err, SparkleError::ReportError(_)));
    }
}
