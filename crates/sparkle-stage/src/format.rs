//! TOML stage file format definitions

use serde::{Deserialize, Serialize};

/// Root structure of a TOML stage file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageFile {
    #[serde(default)]
    pub stage: StageMetadata,
    #[serde(default, rename = "prim")]
    pub prims: Vec<PrimDef>,
}

/// Stage metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for StageMetadata {
    fn default() -> Self {
        Self {
            name: None,
            version: default_version(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_specifier() -> String {
    "def".to_string()
}

fn default_true() -> bool {
    true
}

/// Definition of a prim in a stage file. Parents must appear before children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimDef {
    pub path: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// `def`, `over` or `class`
    #[serde(default = "default_specifier")]
    pub specifier: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_schemas: Vec<String>,
    #[serde(default, rename = "attribute", skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeDef>,
    #[serde(default, rename = "relationship", skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipDef>,
}

impl PrimDef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            type_name: None,
            specifier: default_specifier(),
            active: true,
            api_schemas: Vec::new(),
            attributes: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_api_schema(mut self, schema: impl Into<String>) -> Self {
        self.api_schemas.push(schema.into());
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeDef) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// An attribute in a stage file. `type` is inferred from `value` when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<toml::Value>,
}

impl AttributeDef {
    pub fn new(name: impl Into<String>, value_type: impl Into<String>, value: toml::Value) -> Self {
        Self {
            name: name.into(),
            value_type: Some(value_type.into()),
            value: Some(value),
        }
    }
}

/// A relationship in a stage file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipDef {
    pub name: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

impl StageFile {
    /// Create a new, empty stage file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            stage: StageMetadata {
                name: Some(name.into()),
                version: default_version(),
            },
            prims: Vec::new(),
        }
    }

    pub fn add_prim(&mut self, prim: PrimDef) {
        self.prims.push(prim);
    }
}
