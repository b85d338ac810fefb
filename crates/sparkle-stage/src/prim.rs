//! Prims and their properties

use crate::value::{Value, ValueType};
use sparkle_core::PrimPath;

/// How a prim was introduced in its layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Specifier {
    /// `def` - a concrete, defined prim
    #[default]
    Def,
    /// `over` - an opinion that does not define the prim on its own
    Over,
    /// `class` - an abstract prim used for inheritance
    Class,
}

impl Specifier {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "def" => Some(Specifier::Def),
            "over" => Some(Specifier::Over),
            "class" => Some(Specifier::Class),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Specifier::Def => "def",
            Specifier::Over => "over",
            Specifier::Class => "class",
        }
    }
}

/// A named, typed attribute. `value` is `None` when declared without a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    value_type: ValueType,
    value: Option<Value>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value_type: ValueType, value: Option<Value>) -> Self {
        Self {
            name: name.into(),
            value_type,
            value,
        }
    }

    /// Shorthand for a `float` attribute with a value
    pub fn float(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, ValueType::Float, Some(Value::Number(value)))
    }

    /// Shorthand for a `token` attribute with a value
    pub fn token(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ValueType::Token, Some(Value::String(value.into())))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// A named relationship to zero or more target prims
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    name: String,
    targets: Vec<PrimPath>,
}

impl Relationship {
    pub fn new(name: impl Into<String>, targets: Vec<PrimPath>) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn targets(&self) -> &[PrimPath] {
        &self.targets
    }
}

/// A scene graph node. Attributes and relationships keep their authored order.
#[derive(Debug, Clone, PartialEq)]
pub struct Prim {
    path: PrimPath,
    specifier: Specifier,
    type_name: Option<String>,
    active: bool,
    api_schemas: Vec<String>,
    attributes: Vec<Attribute>,
    relationships: Vec<Relationship>,
}

impl Prim {
    /// Create an untyped, active `def` prim
    pub fn new(path: PrimPath) -> Self {
        Self {
            path,
            specifier: Specifier::Def,
            type_name: None,
            active: true,
            api_schemas: Vec::new(),
            attributes: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_specifier(mut self, specifier: Specifier) -> Self {
        self.specifier = specifier;
        self
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_api_schema(mut self, schema: impl Into<String>) -> Self {
        self.apply_api_schema(schema);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.set_attribute(attribute);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.set_relationship(relationship);
        self
    }

    /// Apply an API schema; applying the same schema twice is a no-op
    pub fn apply_api_schema(&mut self, schema: impl Into<String>) {
        let schema = schema.into();
        if !self.api_schemas.contains(&schema) {
            self.api_schemas.push(schema);
        }
    }

    pub fn remove_api_schema(&mut self, schema: &str) {
        self.api_schemas.retain(|s| s != schema);
    }

    /// Replace the applied API schemas, dropping duplicates
    pub fn set_api_schemas(&mut self, schemas: Vec<String>) {
        self.api_schemas.clear();
        for schema in schemas {
            self.apply_api_schema(schema);
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Add an attribute, replacing any existing attribute with the same name in place
    pub fn set_attribute(&mut self, attribute: Attribute) {
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Add a relationship, replacing any existing relationship with the same name in place
    pub fn set_relationship(&mut self, relationship: Relationship) {
        match self
            .relationships
            .iter_mut()
            .find(|r| r.name == relationship.name)
        {
            Some(existing) => *existing = relationship,
            None => self.relationships.push(relationship),
        }
    }

    pub fn path(&self) -> &PrimPath {
        &self.path
    }

    pub fn name(&self) -> &str {
        self.path.name()
    }

    pub fn specifier(&self) -> Specifier {
        self.specifier
    }

    /// The declared schema type, or `""` for untyped prims
    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or("")
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_defined(&self) -> bool {
        self.specifier != Specifier::Over
    }

    pub fn is_abstract(&self) -> bool {
        self.specifier == Specifier::Class
    }

    pub fn applied_schemas(&self) -> &[String] {
        &self.api_schemas
    }

    pub fn has_api_schema(&self, schema: &str) -> bool {
        self.api_schemas.iter().any(|s| s == schema)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn get_relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }
}
