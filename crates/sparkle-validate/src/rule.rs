//! The rule contract

use crate::types::{Issue, Severity};
use sparkle_stage::{Prim, Stage};

/// A stateless validation check run against every traversed prim.
///
/// Rules never mutate the stage and never fail: anything wrong with the data
/// is reported as an [`Issue`]. A rule that does not apply to a prim returns
/// an empty vector.
pub trait Rule: Send + Sync {
    /// Unique identifier, e.g. `HEALTH_COMP_001`
    fn id(&self) -> &str;

    /// One-line human readable description
    fn description(&self) -> &str;

    fn validate(&self, stage: &Stage, prim: &Prim) -> Vec<Issue>;

    /// Build an issue on `prim` tagged with this rule's id
    fn issue(&self, prim: &Prim, severity: Severity, message: String) -> Issue {
        Issue::new(prim.path().clone(), message, severity, self.id())
    }
}
