use crate::rule::Rule;
use crate::types::{Issue, Severity};
use sparkle_stage::{Prim, Stage, ValueType};

const HEALTH_API: &str = "SparkleHealthAPI";
const CURRENT: &str = "sparkle:health:current";
const MAXIMUM: &str = "sparkle:health:maximum";
const MINIMUM_VALUE: f64 = 0.0;

/// Health attributes must exist as non-negative floats with current <= maximum
#[derive(Debug, Default)]
pub struct HealthComponentRule;

impl HealthComponentRule {
    fn check_attribute(&self, prim: &Prim, name: &str, issues: &mut Vec<Issue>) {
        let Some(attr) = prim.get_attribute(name) else {
            issues.push(
                self.issue(
                    prim,
                    Severity::Error,
                    format!("Health component missing required attribute '{}'", name),
                )
                .with_fix(format!("Add attribute '{}' with appropriate value", name)),
            );
            return;
        };

        if attr.value_type() != &ValueType::Float {
            issues.push(
                self.issue(
                    prim,
                    Severity::Error,
                    format!(
                        "Attribute '{}' has incorrect type '{}', expected '{}'",
                        name,
                        attr.value_type(),
                        ValueType::Float
                    ),
                )
                .with_fix(format!("Change attribute type to '{}'", ValueType::Float)),
            );
        }

        if let Some(value) = attr.value().and_then(|v| v.as_f64()) {
            if value < MINIMUM_VALUE {
                issues.push(
                    self.issue(
                        prim,
                        Severity::Error,
                        format!(
                            "Attribute '{}' value {:?} is less than minimum {:?}",
                            name, value, MINIMUM_VALUE
                        ),
                    )
                    .with_fix(format!("Set value to at least {:?}", MINIMUM_VALUE)),
                );
            }
        }
    }
}

impl Rule for HealthComponentRule {
    fn id(&self) -> &str {
        "HEALTH_COMP_001"
    }

    fn description(&self) -> &str {
        "Health component should have required attributes with valid values"
    }

    fn validate(&self, _stage: &Stage, prim: &Prim) -> Vec<Issue> {
        let mut issues = Vec::new();
        if !prim.has_api_schema(HEALTH_API) {
            return issues;
        }

        self.check_attribute(prim, CURRENT, &mut issues);
        self.check_attribute(prim, MAXIMUM, &mut issues);

        let number = |name: &str| {
            prim.get_attribute(name)
                .and_then(|a| a.value())
                .and_then(|v| v.as_f64())
        };
        if let (Some(current), Some(maximum)) = (number(CURRENT), number(MAXIMUM)) {
            if current > maximum {
                issues.push(
                    self.issue(
                        prim,
                        Severity::Error,
                        format!(
                            "Current health ({:?}) exceeds maximum health ({:?})",
                            current, maximum
                        ),
                    )
                    .with_fix(
                        "Reduce current health to be less than or equal to maximum health",
                    ),
                );
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{check, prim};
    use sparkle_stage::{Attribute, Value};

    fn healthy(current: f64, maximum: f64) -> Prim {
        prim("/World/Carrot")
            .with_api_schema(HEALTH_API)
            .with_attribute(Attribute::float(CURRENT, current))
            .with_attribute(Attribute::float(MAXIMUM, maximum))
    }

    #[test]
    fn test_current_exceeds_maximum() {
        let issues = check(&HealthComponentRule, &healthy(150.0, 100.0));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), Severity::Error);
        assert_eq!(issues[0].rule_id(), "HEALTH_COMP_001");
        assert!(issues[0].message().contains("exceeds maximum"));
    }

    #[test]
    fn test_zero_is_valid() {
        assert!(check(&HealthComponentRule, &healthy(0.0, 0.0)).is_empty());
        assert!(check(&HealthComponentRule, &healthy(0.0, 100.0)).is_empty());
    }

    #[test]
    fn test_negative_values() {
        let issues = check(&HealthComponentRule, &healthy(-5.0, 100.0));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message().contains("less than minimum"));
        assert!(issues[0].message().contains(CURRENT));
    }

    #[test]
    fn test_missing_attributes() {
        let p = prim("/World/Carrot").with_api_schema(HEALTH_API);
        let issues = check(&HealthComponentRule, &p);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity() == Severity::Error));
        assert!(issues[0].message().contains(CURRENT));
        assert!(issues[1].message().contains(MAXIMUM));
    }

    #[test]
    fn test_wrong_type() {
        let p = prim("/World/Carrot")
            .with_api_schema(HEALTH_API)
            .with_attribute(Attribute::new(CURRENT, ValueType::Double, Some(Value::Number(10.0))))
            .with_attribute(Attribute::float(MAXIMUM, 100.0));
        let issues = check(&HealthComponentRule, &p);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message(),
            "Attribute 'sparkle:health:current' has incorrect type 'double', expected 'float'"
        );
    }

    #[test]
    fn test_value_less_attributes_skip_value_checks() {
        let p = prim("/World/Carrot")
            .with_api_schema(HEALTH_API)
            .with_attribute(Attribute::new(CURRENT, ValueType::Float, None))
            .with_attribute(Attribute::float(MAXIMUM, 100.0));
        assert!(check(&HealthComponentRule, &p).is_empty());
    }

    #[test]
    fn test_not_applicable_without_schema() {
        let p = prim("/World/Rock").with_attribute(Attribute::float(CURRENT, -1.0));
        assert!(check(&HealthComponentRule, &p).is_empty());
    }
}
