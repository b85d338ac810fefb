//! Sparkle Stage - Read-only scene graph access
//!
//! This crate is the scene graph adapter consumed by the validator. It holds
//! prims with attributes, relationships and applied API schemas, walks them
//! depth-first, and loads them from USDA or TOML stage files.

mod format;
mod loader;
mod prim;
mod stage;
mod usda;
mod value;

pub use format::{AttributeDef, PrimDef, RelationshipDef, StageFile, StageMetadata};
pub use loader::{load_stage_string, open_stage, StageFormat};
pub use prim::{Attribute, Prim, Relationship, Specifier};
pub use stage::{Stage, Traverse};
pub use usda::parse_usda;
pub use value::{Value, ValueType};
