use crate::rule::Rule;
use crate::types::{Issue, Severity};
use sparkle_stage::{Prim, Stage};

const ENEMY_SCHEMAS: [&str; 3] = ["SparkleHealthAPI", "SparkleCombatAPI", "SparkleAIAPI"];
const PLAYER_SCHEMAS: [&str; 2] = ["SparkleHealthAPI", "SparkleMovementAPI"];
const ENTITY_ID: &str = "sparkle:entity:id";

/// Typed game entities must carry the schemas and identifiers their type implies
#[derive(Debug, Default)]
pub struct EntityTypeRule;

impl EntityTypeRule {
    fn check_schemas(&self, prim: &Prim, kind: &str, expected: &[&str]) -> Vec<Issue> {
        expected
            .iter()
            .filter(|schema| !prim.has_api_schema(schema))
            .map(|schema| {
                self.issue(
                    prim,
                    Severity::Warning,
                    format!("{} is missing recommended schema: {}", kind, schema),
                )
                .with_fix(format!(
                    "Apply {} to this {} entity",
                    schema,
                    kind.to_lowercase()
                ))
            })
            .collect()
    }

    fn check_pickup(&self, prim: &Prim) -> Vec<Issue> {
        if prim.get_attribute(ENTITY_ID).is_some() {
            return Vec::new();
        }
        vec![self
            .issue(
                prim,
                Severity::Error,
                format!("Pickup is missing required '{}' attribute", ENTITY_ID),
            )
            .with_fix(format!("Add '{}' attribute with unique ID", ENTITY_ID))]
    }
}

impl Rule for EntityTypeRule {
    fn id(&self) -> &str {
        "ENTITY_TYPE_001"
    }

    fn description(&self) -> &str {
        "Entity types should have appropriate API schemas"
    }

    fn validate(&self, _stage: &Stage, prim: &Prim) -> Vec<Issue> {
        match prim.type_name() {
            "SparkleEnemyCarrot" => self.check_schemas(prim, "Enemy", &ENEMY_SCHEMAS),
            "SparklePlayer" => self.check_schemas(prim, "Player", &PLAYER_SCHEMAS),
            "SparklePickup" => self.check_pickup(prim),
            _ => Vec::new(),
        }
    }
}
