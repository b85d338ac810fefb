//! Validation engine

use crate::config::ValidatorConfig;
use crate::registry::RuleSet;
use crate::report::ValidationReport;
use crate::types::{Issue, Severity};
use rayon::prelude::*;
use sparkle_stage::{Prim, Stage};

/// Per-severity issue counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub(crate) fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.errors,
            Severity::Warning => self.warnings,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }
}

/// Runs every rule against every traversed prim and keeps the results of the
/// latest run.
#[derive(Debug)]
pub struct Validator {
    rules: RuleSet,
    issues: Vec<Issue>,
    counts: SeverityCounts,
}

impl Validator {
    /// Create a validator with the standard rule set
    pub fn new() -> Self {
        Self::with_rules(RuleSet::standard())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            issues: Vec::new(),
            counts: SeverityCounts::default(),
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::with_rules(RuleSet::from_config(config))
    }

    /// Validate every traversed prim. Results of any previous run are discarded.
    pub fn validate(&mut self, stage: &Stage) -> &[Issue] {
        self.reset();
        let mut prims = 0;
        for prim in stage.traverse() {
            let issues = self.check_prim(stage, prim);
            self.append(issues);
            prims += 1;
        }
        self.finish(prims);
        &self.issues
    }

    /// Same result as [`Validator::validate`], checking prims on the rayon pool
    pub fn validate_parallel(&mut self, stage: &Stage) -> &[Issue] {
        self.reset();
        let prims: Vec<&Prim> = stage.traverse().collect();
        let per_prim: Vec<Vec<Issue>> = prims
            .par_iter()
            .map(|prim| self.check_prim(stage, prim))
            .collect();
        for issues in per_prim {
            self.append(issues);
        }
        self.finish(prims.len());
        &self.issues
    }

    /// One-line aggregate of the latest run
    pub fn summary(&self) -> String {
        format!(
            "Validation complete: {} errors, {} warnings, {} info",
            self.counts.errors, self.counts.warnings, self.counts.info
        )
    }

    /// Issues of the latest run, optionally restricted to one severity
    pub fn issues(&self, severity: Option<Severity>) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| severity.map_or(true, |s| i.severity() == s))
            .collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.counts.get(severity)
    }

    pub fn counts(&self) -> SeverityCounts {
        self.counts
    }

    pub fn has_errors(&self) -> bool {
        self.counts.errors > 0
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn report(&self) -> ValidationReport {
        ValidationReport::from_issues(&self.issues)
    }

    fn reset(&mut self) {
        self.issues.clear();
        self.counts = SeverityCounts::default();
    }

    fn check_prim(&self, stage: &Stage, prim: &Prim) -> Vec<Issue> {
        self.rules
            .all()
            .iter()
            .flat_map(|rule| rule.validate(stage, prim))
            .collect()
    }

    fn append(&mut self, issues: Vec<Issue>) {
        for issue in &issues {
            self.counts.record(issue.severity());
        }
        self.issues.extend(issues);
    }

    fn finish(&self, prims: usize) {
        log::info!(
            "Checked {} prim(s) with {} rule(s): {} issue(s)",
            prims,
            self.rules.len(),
            self.issues.len()
        );
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
