//! Sparkle Validate - Rule-based schema validation
//!
//! This crate checks a loaded [`sparkle_stage::Stage`] against the Sparkle
//! game schema conventions. Every traversed prim is handed to every rule in
//! registration order; the findings are collected as [`Issue`]s, counted per
//! severity and exported as a [`ValidationReport`].

mod config;
mod registry;
mod report;
mod rule;
pub mod rules;
mod types;
mod validator;

pub use config::{
    MovementConfig, PerformanceConfig, RulesConfig, ValidatorConfig, DISABLED_RULES_ENV,
    PROJECT_CONFIG_PATH,
};
pub use registry::RuleSet;
pub use report::{ReportIssue, ReportSummary, ValidationReport};
pub use rule::Rule;
pub use types::{Issue, Severity};
pub use validator::{SeverityCounts, Validator};
