//! The built-in rule set

mod ai;
mod entity_type;
mod health;
mod movement;
mod namespace;
mod performance;

pub use ai::{AiComponentRule, AI_BEHAVIORS};
pub use entity_type::EntityTypeRule;
pub use health::HealthComponentRule;
pub use movement::{MovementComponentRule, DEFAULT_MAX_REASONABLE_SPEED, MOVEMENT_PATTERNS};
pub use namespace::NamespaceRule;
pub use performance::{PerformanceLimits, PerformanceRule};
