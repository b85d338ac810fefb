use crate::rule::Rule;
use crate::types::{Issue, Severity};
use sparkle_stage::{Prim, Stage, ValueType};

/// Thresholds above which a prim is flagged. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceLimits {
    pub max_applied_schemas: usize,
    pub max_attributes: usize,
    pub max_expensive_attributes: usize,
}

impl Default for PerformanceLimits {
    fn default() -> Self {
        Self {
            max_applied_schemas: 10,
            max_attributes: 50,
            max_expensive_attributes: 10,
        }
    }
}

/// Flags prims that carry too many schemas, attributes, or heavy attribute types
#[derive(Debug, Default)]
pub struct PerformanceRule {
    limits: PerformanceLimits,
}

impl PerformanceRule {
    pub fn new(limits: PerformanceLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PerformanceLimits {
        &self.limits
    }
}

fn is_expensive(value_type: &ValueType) -> bool {
    matches!(value_type, ValueType::Matrix4d | ValueType::String)
}

impl Rule for PerformanceRule {
    fn id(&self) -> &str {
        "PERF_001"
    }

    fn description(&self) -> &str {
        "Schema usage should follow performance best practices"
    }

    fn validate(&self, _stage: &Stage, prim: &Prim) -> Vec<Issue> {
        let mut issues = Vec::new();

        let schemas = prim.applied_schemas().len();
        if schemas > self.limits.max_applied_schemas {
            issues.push(
                self.issue(
                    prim,
                    Severity::Warning,
                    format!("Prim has excessive number of API schemas applied ({})", schemas),
                )
                .with_fix("Consider consolidating functionality to reduce schema count"),
            );
        }

        let attributes = prim.attributes();
        if attributes.len() > self.limits.max_attributes {
            issues.push(
                self.issue(
                    prim,
                    Severity::Warning,
                    format!("Prim has excessive number of attributes ({})", attributes.len()),
                )
                .with_fix("Consider refactoring to reduce attribute count"),
            );
        }

        let expensive = attributes
            .iter()
            .filter(|a| is_expensive(a.value_type()))
            .count();
        if expensive > self.limits.max_expensive_attributes {
            issues.push(
                self.issue(
                    prim,
                    Severity::Warning,
                    format!(
                        "Prim has many attributes with expensive data types ({})",
                        expensive
                    ),
                )
                .with_fix("Consider using more efficient data types where possible"),
            );
        }

        issues
    }
}
