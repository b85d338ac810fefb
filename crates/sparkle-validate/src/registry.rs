//! Ordered rule registry

use crate::config::ValidatorConfig;
use crate::rule::Rule;
use crate::rules::{
    AiComponentRule, EntityTypeRule, HealthComponentRule, MovementComponentRule, NamespaceRule,
    PerformanceRule,
};
use std::collections::HashSet;
use std::fmt;

/// The rules a validator runs, in registration order
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Create a new empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// The six built-in rules with default settings
    pub fn standard() -> Self {
        Self::from_config(&ValidatorConfig::default())
    }

    /// The built-in rules tuned by `config`, minus any it disables
    pub fn from_config(config: &ValidatorConfig) -> Self {
        let mut set = Self::new();
        set.register(NamespaceRule);
        set.register(HealthComponentRule);
        set.register(MovementComponentRule::new(
            config.movement.max_reasonable_speed,
        ));
        set.register(AiComponentRule);
        set.register(PerformanceRule::new(config.performance.limits()));
        set.register(EntityTypeRule);

        for id in &config.rules.disabled {
            if set.remove(id).is_none() {
                log::warn!("Ignoring unknown rule id '{}' in disabled list", id);
            }
        }

        set
    }

    /// Append a rule; it runs after every rule already registered
    pub fn register<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Remove the first rule with the given id
    pub fn remove(&mut self, id: &str) -> Option<Box<dyn Rule>> {
        let index = self.rules.iter().position(|r| r.id() == id)?;
        Some(self.rules.remove(index))
    }

    pub fn all(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| &**r)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule ids registered more than once, in first-repeat order
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for id in self.ids() {
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet").field("rules", &self.ids()).finish()
    }
}
