use crate::rule::Rule;
use crate::types::{Issue, Severity};
use sparkle_stage::{Prim, Stage};

const MOVEMENT_API: &str = "SparkleMovementAPI";
const SPEED: &str = "sparkle:movement:speed";
const PATTERN: &str = "sparkle:movement:pattern";

/// Allowed values of `sparkle:movement:pattern`
pub const MOVEMENT_PATTERNS: [&str; 6] =
    ["direct", "patrol", "wander", "charge", "flee", "stationary"];

pub const DEFAULT_MAX_REASONABLE_SPEED: f64 = 100.0;

/// Movement needs a non-negative speed and a known pattern
#[derive(Debug)]
pub struct MovementComponentRule {
    max_reasonable_speed: f64,
}

impl MovementComponentRule {
    pub fn new(max_reasonable_speed: f64) -> Self {
        Self {
            max_reasonable_speed,
        }
    }

    pub fn max_reasonable_speed(&self) -> f64 {
        self.max_reasonable_speed
    }

    fn check_speed(&self, prim: &Prim, issues: &mut Vec<Issue>) {
        let Some(attr) = prim.get_attribute(SPEED) else {
            issues.push(
                self.issue(
                    prim,
                    Severity::Error,
                    format!("Movement component missing required attribute '{}'", SPEED),
                )
                .with_fix(format!("Add '{}' attribute with appropriate value", SPEED)),
            );
            return;
        };

        let Some(speed) = attr.value().and_then(|v| v.as_f64()) else {
            return;
        };
        if speed < 0.0 {
            issues.push(
                self.issue(
                    prim,
                    Severity::Error,
                    format!("Movement speed ({:?}) cannot be negative", speed),
                )
                .with_fix("Set speed to a non-negative value"),
            );
        } else if speed > self.max_reasonable_speed {
            issues.push(
                self.issue(
                    prim,
                    Severity::Warning,
                    format!(
                        "Movement speed ({:?}) exceeds maximum reasonable value ({})",
                        speed, self.max_reasonable_speed
                    ),
                )
                .with_fix("Consider reducing speed unless extreme speed is intentional"),
            );
        }
    }

    fn check_pattern(&self, prim: &Prim, issues: &mut Vec<Issue>) {
        let Some(attr) = prim.get_attribute(PATTERN) else {
            issues.push(
                self.issue(
                    prim,
                    Severity::Warning,
                    format!("Movement component missing required attribute '{}'", PATTERN),
                )
                .with_fix(format!("Add '{}' attribute with appropriate value", PATTERN)),
            );
            return;
        };

        if let Some(pattern) = attr.value().and_then(|v| v.as_str()) {
            if !MOVEMENT_PATTERNS.contains(&pattern) {
                let allowed = MOVEMENT_PATTERNS.join(", ");
                issues.push(
                    self.issue(
                        prim,
                        Severity::Error,
                        format!(
                            "Movement pattern '{}' is not one of the allowed values: {}",
                            pattern, allowed
                        ),
                    )
                    .with_fix(format!("Set pattern to one of: {}", allowed)),
                );
            }
        }
    }
}

impl Default for MovementComponentRule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REASONABLE_SPEED)
    }
}

impl Rule for MovementComponentRule {
    fn id(&self) -> &str {
        "MOVEMENT_COMP_001"
    }

    fn description(&self) -> &str {
        "Movement component should have valid pattern and speed values"
    }

    fn validate(&self, _stage: &Stage, prim: &Prim) -> Vec<Issue> {
        let mut issues = Vec::new();
        if !prim.has_api_schema(MOVEMENT_API) {
            return issues;
        }

        self.check_speed(prim, &mut issues);
        self.check_pattern(prim, &mut issues);
        issues
    }
}
