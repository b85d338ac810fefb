//! Stage loading from USDA and TOML files

use crate::format::{PrimDef, StageFile};
use crate::prim::{Attribute, Prim, Relationship, Specifier};
use crate::stage::Stage;
use crate::usda::parse_usda;
use crate::value::{Value, ValueType};
use sparkle_core::{PrimPath, Result, SparkleError};
use std::fs;
use std::path::Path;

/// Supported stage file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageFormat {
    Usda,
    Toml,
}

impl StageFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("usda") | Some("usd") => Ok(StageFormat::Usda),
            Some("toml") => Ok(StageFormat::Toml),
            _ => Err(SparkleError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Open a stage file.
///
/// `.usd` files are accepted only when they hold USDA text; binary crate
/// files are rejected.
pub fn open_stage<P: AsRef<Path>>(path: P) -> Result<Stage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SparkleError::FileNotFound(path.display().to_string()));
    }

    let format = StageFormat::from_path(path)?;
    let bytes = fs::read(path)?;
    if bytes.starts_with(b"PXR-USDC") {
        return Err(SparkleError::UnsupportedFormat(format!(
            "{} is a binary crate file",
            path.display()
        )));
    }
    let content = String::from_utf8(bytes)
        .map_err(|_| SparkleError::ParseError(format!("{} is not valid UTF-8", path.display())))?;
    let is_usd = path.extension().and_then(|e| e.to_str()) == Some("usd");
    if is_usd && !content.trim_start().starts_with("#usda") {
        return Err(SparkleError::UnsupportedFormat(format!(
            "{} has no #usda header",
            path.display()
        )));
    }

    let mut stage = load_stage_string(&content, format)?;
    if stage.name().is_none() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stage = stage.with_name(stem);
        }
    }

    log::info!(
        "Loaded stage {} ({} prim(s))",
        path.display(),
        stage.prim_count()
    );
    Ok(stage)
}

/// Load a stage from an in-memory string
pub fn load_stage_string(content: &str, format: StageFormat) -> Result<Stage> {
    match format {
        StageFormat::Usda => parse_usda(content),
        StageFormat::Toml => load_toml_stage(content),
    }
}

fn load_toml_stage(content: &str) -> Result<Stage> {
    let file: StageFile = toml::from_str(content)?;
    let mut stage = Stage::new();
    if let Some(name) = &file.stage.name {
        stage = stage.with_name(name.clone());
    }

    for def in &file.prims {
        stage.define_prim(prim_from_def(def)?)?;
    }

    Ok(stage)
}

fn prim_from_def(def: &PrimDef) -> Result<Prim> {
    let path = PrimPath::parse(&def.path)?;
    let specifier = Specifier::parse(&def.specifier).ok_or_else(|| {
        SparkleError::ParseError(format!(
            "{}: unknown specifier '{}'",
            def.path, def.specifier
        ))
    })?;

    let mut prim = Prim::new(path)
        .with_specifier(specifier)
        .with_active(def.active);
    if let Some(type_name) = &def.type_name {
        prim = prim.with_type(type_name.clone());
    }
    for schema in &def.api_schemas {
        prim.apply_api_schema(schema.clone());
    }

    for attr in &def.attributes {
        let value = attr.value.as_ref().map(value_from_toml);
        let value_type = match (&attr.value_type, &value) {
            (Some(name), _) => name.parse::<ValueType>()?,
            (None, Some(value)) => ValueType::infer(value),
            (None, None) => {
                return Err(SparkleError::InvalidValueType(format!(
                    "{}: attribute '{}' needs a type or a value",
                    def.path, attr.name
                )))
            }
        };
        prim.set_attribute(Attribute::new(attr.name.clone(), value_type, value));
    }

    for rel in &def.relationships {
        let targets = rel
            .targets
            .iter()
            .map(|t| PrimPath::parse(t))
            .collect::<Result<Vec<_>>>()?;
        prim.set_relationship(Relationship::new(rel.name.clone(), targets));
    }

    Ok(prim)
}

fn value_from_toml(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(*i as f64),
        toml::Value::Float(f) => Value::Number(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::List(items.iter().map(value_from_toml).collect()),
        toml::Value::Table(table) => Value::List(table.values().map(value_from_toml).collect()),
    }
}
