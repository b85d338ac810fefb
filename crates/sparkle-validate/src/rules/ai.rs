use crate::rule::Rule;
use crate::types::{Issue, Severity};
use sparkle_stage::{Prim, Stage};

const AI_API: &str = "SparkleAIAPI";
const BEHAVIOR: &str = "sparkle:ai:behavior";
const DETECTION_RADIUS: &str = "sparkle:ai:detectionRadius";
const PATROL_PATH: &str = "sparkle:ai:patrolPath";
const MOVEMENT_PATTERN: &str = "sparkle:movement:pattern";

/// Allowed values of `sparkle:ai:behavior`
pub const AI_BEHAVIORS: [&str; 5] = ["passive", "defensive", "aggressive", "neutral", "flee"];

/// AI needs a known behavior, a non-negative detection radius, and a
/// `patrol` movement pattern when it follows a patrol path
#[derive(Debug, Default)]
pub struct AiComponentRule;

impl AiComponentRule {
    fn check_behavior(&self, prim: &Prim, issues: &mut Vec<Issue>) {
        let Some(attr) = prim.get_attribute(BEHAVIOR) else {
            issues.push(
                self.issue(
                    prim,
                    Severity::Error,
                    format!("AI component missing required attribute '{}'", BEHAVIOR),
                )
                .with_fix(format!("Add '{}' attribute with appropriate value", BEHAVIOR)),
            );
            return;
        };

        if let Some(behavior) = attr.value().and_then(|v| v.as_str()) {
            if !AI_BEHAVIORS.contains(&behavior) {
                let allowed = AI_BEHAVIORS.join(", ");
                issues.push(
                    self.issue(
                        prim,
                        Severity::Error,
                        format!(
                            "AI behavior '{}' is not one of the allowed values: {}",
                            behavior, allowed
                        ),
                    )
                    .with_fix(format!("Set behavior to one of: {}", allowed)),
                );
            }
        }
    }
}

impl Rule for AiComponentRule {
    fn id(&self) -> &str {
        "AI_COMP_001"
    }

    fn description(&self) -> &str {
        "AI component should have valid behavior values and consistent configuration"
    }

    fn validate(&self, _stage: &Stage, prim: &Prim) -> Vec<Issue> {
        let mut issues = Vec::new();
        if !prim.has_api_schema(AI_API) {
            return issues;
        }

        self.check_behavior(prim, &mut issues);

        let radius = prim
            .get_attribute(DETECTION_RADIUS)
            .and_then(|a| a.value())
            .and_then(|v| v.as_f64());
        if let Some(radius) = radius.filter(|r| *r < 0.0) {
            issues.push(
                self.issue(
                    prim,
                    Severity::Error,
                    format!("AI detection radius ({:?}) cannot be negative", radius),
                )
                .with_fix("Set detection radius to a non-negative value"),
            );
        }

        // A missing pattern is left to the movement rule.
        if prim.get_relationship(PATROL_PATH).is_some() {
            let pattern = prim
                .get_attribute(MOVEMENT_PATTERN)
                .and_then(|a| a.value())
                .and_then(|v| v.as_str());
            if let Some(pattern) = pattern.filter(|p| *p != "patrol") {
                issues.push(
                    self.issue(
                        prim,
                        Severity::Warning,
                        format!(
                            "AI has patrol path but movement pattern is '{}' instead of 'patrol'",
                            pattern
                        ),
                    )
                    .with_fix(
                        "Change movement pattern to 'patrol' to match patrol path relationship",
                    ),
                );
            }
        }

        issues
    }
}
