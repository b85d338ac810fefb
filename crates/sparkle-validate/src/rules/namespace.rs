use crate::rule::Rule;
use crate::types::{Issue, Severity};
use regex::Regex;
use sparkle_stage::{Prim, Stage};
use std::sync::LazyLock;

static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sparkle:[a-zA-Z]+:[a-zA-Z][a-zA-Z0-9_]*$").unwrap());

/// Attributes in the `sparkle:` namespace must be named `sparkle:<category>:<name>`
#[derive(Debug, Default)]
pub struct NamespaceRule;

impl Rule for NamespaceRule {
    fn id(&self) -> &str {
        "SCHEMA_NAMESPACE_001"
    }

    fn description(&self) -> &str {
        "Property names should follow the namespace convention 'sparkle:category:name'"
    }

    fn validate(&self, _stage: &Stage, prim: &Prim) -> Vec<Issue> {
        prim.attributes()
            .iter()
            .map(|attr| attr.name())
            .filter(|name| name.starts_with("sparkle:") && !NAMESPACE_RE.is_match(name))
            .map(|name| {
                self.issue(
                    prim,
                    Severity::Error,
                    format!("Attribute '{}' does not follow namespace convention", name),
                )
                .with_fix("Rename to follow pattern 'sparkle:category:name'")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{check, prim};
    use sparkle_stage::Attribute;

    #[test]
    fn test_bad_name_is_error() {
        let p = prim("/World/Thing").with_attribute(Attribute::float("sparkle:BadName", 1.0));
        let issues = check(&NamespaceRule, &p);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), Severity::Error);
        assert_eq!(issues[0].rule_id(), "SCHEMA_NAMESPACE_001");
        assert!(issues[0].message().contains("sparkle:BadName"));
    }

    #[test]
    fn test_valid_names_pass() {
        let p = prim("/World/Thing")
            .with_attribute(Attribute::float("sparkle:health:current", 1.0))
            .with_attribute(Attribute::float("sparkle:ai:detection_radius2", 1.0));
        assert!(check(&NamespaceRule, &p).is_empty());
    }

    #[test]
    fn test_other_namespaces_ignored() {
        let p = prim("/World/Thing")
            .with_attribute(Attribute::float("xformOp:translate", 1.0))
            .with_attribute(Attribute::float("sparkleish", 1.0));
        assert!(check(&NamespaceRule, &p).is_empty());
    }

    #[test]
    fn test_each_bad_name_reported() {
        let p = prim("/World/Thing")
            .with_attribute(Attribute::float("sparkle:a:b:c", 1.0))
            .with_attribute(Attribute::float("sparkle:health:2fast", 1.0))
            .with_attribute(Attribute::float("sparkle:ok:name", 1.0));
        assert_eq!(check(&NamespaceRule, &p).len(), 2);
    }
}
