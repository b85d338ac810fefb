//! USDA (ASCII) layer reader
//!
//! Reads a single layer into a [`Stage`]. Supported syntax:
//!
//! - `def`, `over` and `class` prims, typed or untyped, nested to any depth
//! - prim metadata: `apiSchemas` (explicit, `prepend`, `append`, `add`,
//!   `delete`) and `active`; `reorder` and other keys are parsed and ignored
//! - attributes with `custom`/`uniform`/`varying`/`config` qualifiers, array
//!   types and default values
//! - `name.timeSamples` and `name.connect` declare the attribute without a
//!   default value
//! - relationships with one or many targets
//! - `variantSet` blocks and `reorder` statements (parsed, not composed)

use crate::prim::{Attribute, Prim, Relationship, Specifier};
use crate::stage::Stage;
use crate::value::{Value, ValueType};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use sparkle_core::{PrimPath, Result, SparkleError};

#[derive(Parser)]
#[grammar = "usda.pest"]
struct UsdaParser;

/// Parse USDA text into a stage
pub fn parse_usda(content: &str) -> Result<Stage> {
    let mut pairs = UsdaParser::parse(Rule::file, content)
        .map_err(|e| SparkleError::ParseError(e.to_string()))?;
    let file = expect_next(&mut pairs, "layer")?;

    let mut stage = Stage::new();
    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::prim => read_prim(pair, None, &mut stage)?,
            Rule::metadata => log::debug!("Skipping layer metadata"),
            _ => {}
        }
    }

    log::debug!("Parsed USDA layer with {} prim(s)", stage.prim_count());
    Ok(stage)
}

fn expect_next<'i>(pairs: &mut Pairs<'i, Rule>, what: &str) -> Result<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| SparkleError::ParseError(format!("expected {}", what)))
}

fn read_prim(pair: Pair<Rule>, parent: Option<&PrimPath>, stage: &mut Stage) -> Result<()> {
    let mut inner = pair.into_inner();

    let specifier_pair = expect_next(&mut inner, "prim specifier")?;
    let specifier = Specifier::parse(specifier_pair.as_str()).ok_or_else(|| {
        SparkleError::ParseError(format!("unknown specifier '{}'", specifier_pair.as_str()))
    })?;

    let mut next = expect_next(&mut inner, "prim name")?;
    let type_name = if next.as_rule() == Rule::prim_type {
        let type_name = next.as_str().to_string();
        next = expect_next(&mut inner, "prim name")?;
        Some(type_name)
    } else {
        None
    };

    let name = unquote(next.as_str());
    let path = match parent {
        Some(parent) => parent.child(&name)?,
        None => PrimPath::root(&name)?,
    };

    let mut prim = Prim::new(path.clone()).with_specifier(specifier);
    if let Some(type_name) = type_name {
        prim = prim.with_type(type_name);
    }

    let mut children = Vec::new();
    for item in inner {
        match item.as_rule() {
            Rule::metadata => apply_prim_metadata(item, &mut prim)?,
            Rule::attribute => {
                let attribute = read_attribute(item)?;
                let keeps_existing = !attribute.has_value()
                    && prim
                        .get_attribute(attribute.name())
                        .map(|a| a.has_value())
                        .unwrap_or(false);
                if !keeps_existing {
                    prim.set_attribute(attribute);
                }
            }
            Rule::relationship => prim.set_relationship(read_relationship(item)?),
            Rule::prim => children.push(item),
            Rule::variant_set => log::debug!("Ignoring variantSet on {}", path),
            _ => {}
        }
    }

    stage.define_prim(prim)?;
    for child in children {
        read_prim(child, Some(&path), stage)?;
    }

    Ok(())
}

fn apply_prim_metadata(pair: Pair<Rule>, prim: &mut Prim) -> Result<()> {
    for entry in pair.into_inner() {
        let mut parts = entry.into_inner();
        let Some(first) = parts.next() else {
            continue;
        };

        let (list_op, key) = match first.as_rule() {
            Rule::list_op => (Some(first.as_str()), parts.next()),
            Rule::identifier => (None, Some(first)),
            // Bare doc string
            _ => continue,
        };
        let (Some(key), Some(value)) = (key, parts.next()) else {
            continue;
        };

        match key.as_str() {
            "apiSchemas" => {
                let schemas = string_list(read_value(value)?);
                match list_op {
                    None => prim.set_api_schemas(schemas),
                    Some("delete") => {
                        for schema in &schemas {
                            prim.remove_api_schema(schema);
                        }
                    }
                    Some("reorder") => {
                        log::debug!("Ignoring reorder apiSchemas on {}", prim.path())
                    }
                    Some("prepend") => {
                        let mut merged = schemas;
                        merged.extend(prim.applied_schemas().iter().cloned());
                        prim.set_api_schemas(merged);
                    }
                    Some(_) => {
                        for schema in schemas {
                            prim.apply_api_schema(schema);
                        }
                    }
                }
            }
            "active" => {
                if let Some(active) = read_value(value)?.and_then(|v| v.as_bool()) {
                    prim.set_active(active);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::List(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    }
}

fn read_attribute(pair: Pair<Rule>) -> Result<Attribute> {
    let mut value_type = None;
    let mut name = None;
    let mut decorated = false;
    let mut value = None;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::list_op | Rule::qualifier | Rule::metadata => {}
            Rule::type_name => value_type = Some(part.as_str().parse::<ValueType>()?),
            Rule::property_name => {
                let full = part.as_str();
                match full.split_once('.') {
                    Some((base, _suffix)) => {
                        name = Some(base.to_string());
                        decorated = true;
                    }
                    None => name = Some(full.to_string()),
                }
            }
            _ => value = read_value(part)?,
        }
    }

    let value_type =
        value_type.ok_or_else(|| SparkleError::ParseError("attribute without type".into()))?;
    let name = name.ok_or_else(|| SparkleError::ParseError("attribute without name".into()))?;

    // Time samples and connections are not default values
    let value = if decorated {
        None
    } else {
        value.map(|v| coerce(v, &value_type))
    };

    Ok(Attribute::new(name, value_type, value))
}

/// Interpret an untyped literal using the attribute's declared type
fn coerce(value: Value, value_type: &ValueType) -> Value {
    match (value_type, value) {
        (ValueType::Bool, Value::Number(n)) => Value::Bool(n != 0.0),
        (ValueType::Asset, Value::String(s)) => Value::Asset(s),
        (ValueType::Array(element), Value::List(items)) => Value::List(
            items
                .into_iter()
                .map(|item| coerce(item, element))
                .collect(),
        ),
        (_, other) => other,
    }
}

fn read_relationship(pair: Pair<Rule>) -> Result<Relationship> {
    let mut name = None;
    let mut targets = Vec::new();

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::property_name => name = Some(part.as_str().to_string()),
            Rule::rel_targets => {
                for target in part.into_inner() {
                    if target.as_rule() != Rule::path_ref {
                        continue;
                    }
                    let raw = strip_delimiters(target.as_str(), 1);
                    match PrimPath::parse(raw) {
                        Ok(path) => targets.push(path),
                        Err(e) => log::warn!("Skipping relationship target <{}>: {}", raw, e),
                    }
                }
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| SparkleError::ParseError("relationship without name".into()))?;
    Ok(Relationship::new(name, targets))
}

/// Convert a value pair; `None` means the value is blocked or not representable
fn read_value(pair: Pair<Rule>) -> Result<Option<Value>> {
    let value = match pair.as_rule() {
        Rule::none | Rule::dictionary => None,
        Rule::boolean => Some(Value::Bool(pair.as_str() == "true")),
        Rule::number => {
            let n: f64 = pair.as_str().parse().map_err(|_| {
                SparkleError::ParseError(format!("invalid number '{}'", pair.as_str()))
            })?;
            Some(Value::Number(n))
        }
        Rule::string => Some(Value::String(unquote(pair.as_str()))),
        Rule::identifier => Some(Value::String(pair.as_str().to_string())),
        Rule::asset_ref => pair
            .into_inner()
            .find(|p| p.as_rule() == Rule::asset_path)
            .map(|p| {
                let raw = p.as_str();
                let width = if raw.starts_with("@@@") { 3 } else { 1 };
                Value::Asset(strip_delimiters(raw, width).to_string())
            }),
        Rule::path_ref => Some(Value::Path(strip_delimiters(pair.as_str(), 1).to_string())),
        Rule::array | Rule::tuple => {
            let mut items = Vec::new();
            for item in pair.into_inner() {
                if let Some(v) = read_value(item)? {
                    items.push(v);
                }
            }
            Some(Value::List(items))
        }
        other => {
            return Err(SparkleError::ParseError(format!(
                "unexpected value {:?}",
                other
            )))
        }
    };
    Ok(value)
}

fn strip_delimiters(raw: &str, width: usize) -> &str {
    if raw.len() >= width * 2 {
        &raw[width..raw.len() - width]
    } else {
        raw
    }
}

/// Strip quotes (single, double or triple) and resolve escapes
fn unquote(raw: &str) -> String {
    let width = if raw.starts_with("\"\"\"") || raw.starts_with("'''") {
        3
    } else {
        1
    };
    let body = strip_delimiters(raw, width);

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"#usda 1.0
(
    defaultPrim = "World"
    doc = """Carrot patch
    test level"""
    upAxis = "Y"
)

class "_EnemyBase"
{
    float sparkle:health:maximum = 100
}

def Xform "World" (
    kind = "assembly"
)
{
    uniform token[] xformOpOrder = ["xformOp:transform"]
    matrix4d xformOp:transform = ( (1, 0, 0, 0), (0, 1, 0, 0), (0, 0, 1, 0), (0, 0, 0, 1) )

    def SparkleEnemyCarrot "Carrot_01" (
        prepend apiSchemas = ["SparkleHealthAPI", "SparkleAIAPI"]
    )
    {
        float sparkle:health:current = 150
        float sparkle:health:maximum = 100.0
        custom uniform token sparkle:ai:behavior = "aggressive" (
            allowedTokens = ["passive", "aggressive"]
        )
        float sparkle:ai:detectionRadius.timeSamples = {
            0: 5,
            10: 7.5,
        }
        rel sparkle:ai:patrolPath = </World/PatrolPath>
        rel proxyPrim
        string label = 'it\'s "quoted"'
        asset icon = @./icons/carrot.png@
        bool hostile = 1
    }

    def Xform "PatrolPath"
    {
        float3[] points = [(0, 0, 0), (1, 0, 1e2), (-2.5, .5, 3)]
    }

    def "Disabled" (
        active = false
    )
    {
        def "Inside" {}
    }

    over "Tweaked"
    {
    }

    def SparklePickup "Coin" (
        apiSchemas = ["SparkleHealthAPI", "SparkleMovementAPI"]
        delete apiSchemas = ["SparkleHealthAPI"]
    )
    {
        variantSet "look" = {
            "gold" {
                string sparkle:entity:id = "coin_gold"
            }
        }
        rel targets = [</World/Carrot_01>, </World/PatrolPath>]
    }
}
"#;

    fn level() -> Stage {
        parse_usda(LEVEL).unwrap()
    }

    #[test]
    fn test_parse_hierarchy() {
        let stage = level();
        assert_eq!(stage.prim_count(), 8);

        let traversed: Vec<String> = stage.traverse().map(|p| p.path().to_string()).collect();
        assert_eq!(
            traversed,
            vec![
                "/World",
                "/World/Carrot_01",
                "/World/PatrolPath",
                "/World/Coin"
            ]
        );
    }

    #[test]
    fn test_prim_types_and_specifiers() {
        let stage = level();
        assert_eq!(stage.get_prim("/World").unwrap().type_name(), "Xform");
        assert!(stage.get_prim("/_EnemyBase").unwrap().is_abstract());
        assert!(!stage.get_prim("/World/Tweaked").unwrap().is_defined());
        assert!(!stage.get_prim("/World/Disabled").unwrap().is_active());
        assert_eq!(stage.get_prim("/World/Disabled").unwrap().type_name(), "");
    }

    #[test]
    fn test_api_schema_list_ops() {
        let stage = level();
        let carrot = stage.get_prim("/World/Carrot_01").unwrap();
        assert_eq!(
            carrot.applied_schemas(),
            &["SparkleHealthAPI".to_string(), "SparkleAIAPI".to_string()]
        );

        let coin = stage.get_prim("/World/Coin").unwrap();
        assert_eq!(coin.applied_schemas(), &["SparkleMovementAPI".to_string()]);
    }

    #[test]
    fn test_reorder_api_schemas_ignored() {
        let stage = parse_usda(
            "def \"A\" (\n    reorder apiSchemas = [\"SparkleHealthAPI\"]\n)\n{\n}\n",
        )
        .unwrap();
        assert!(stage.get_prim("/A").unwrap().applied_schemas().is_empty());

        let stage = parse_usda(
            "def \"B\" (\n    apiSchemas = [\"SparkleHealthAPI\", \"SparkleAIAPI\"]\n    \
             reorder apiSchemas = [\"SparkleAIAPI\", \"SparkleMovementAPI\"]\n)\n{\n}\n",
        )
        .unwrap();
        assert_eq!(
            stage.get_prim("/B").unwrap().applied_schemas(),
            &["SparkleHealthAPI".to_string(), "SparkleAIAPI".to_string()]
        );
    }

    #[test]
    fn test_attribute_values() {
        let stage = level();
        let carrot = stage.get_prim("/World/Carrot_01").unwrap();

        let current = carrot.get_attribute("sparkle:health:current").unwrap();
        assert_eq!(current.value_type(), &ValueType::Float);
        assert_eq!(current.value().and_then(|v| v.as_f64()), Some(150.0));

        let behavior = carrot.get_attribute("sparkle:ai:behavior").unwrap();
        assert_eq!(behavior.value_type(), &ValueType::Token);
        assert_eq!(behavior.value().and_then(|v| v.as_str()), Some("aggressive"));

        let label = carrot.get_attribute("label").unwrap();
        assert_eq!(label.value().and_then(|v| v.as_str()), Some("it's \"quoted\""));

        let icon = carrot.get_attribute("icon").unwrap();
        assert_eq!(icon.value(), Some(&Value::Asset("./icons/carrot.png".to_string())));

        let hostile = carrot.get_attribute("hostile").unwrap();
        assert_eq!(hostile.value(), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_time_samples_declare_attribute_without_default() {
        let stage = level();
        let carrot = stage.get_prim("/World/Carrot_01").unwrap();
        let radius = carrot.get_attribute("sparkle:ai:detectionRadius").unwrap();
        assert!(!radius.has_value());
    }

    #[test]
    fn test_array_and_matrix_values() {
        let stage = level();
        let world = stage.get_prim("/World").unwrap();
        let matrix = world.get_attribute("xformOp:transform").unwrap();
        assert_eq!(matrix.value_type(), &ValueType::Matrix4d);
        assert_eq!(matrix.value().and_then(|v| v.as_list()).map(|rows| rows.len()), Some(4));

        let order = world.get_attribute("xformOpOrder").unwrap();
        assert!(order.value_type().is_array());

        let path = stage.get_prim("/World/PatrolPath").unwrap();
        let points = path.get_attribute("points").unwrap();
        let rows = points.value().and_then(|v| v.as_list()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].as_list().unwrap()[2].as_f64(), Some(100.0));
        assert_eq!(rows[2].as_list().unwrap()[1].as_f64(), Some(0.5));
    }

    #[test]
    fn test_relationships() {
        let stage = level();
        let carrot = stage.get_prim("/World/Carrot_01").unwrap();

        let patrol = carrot.get_relationship("sparkle:ai:patrolPath").unwrap();
        assert_eq!(patrol.targets()[0].as_str(), "/World/PatrolPath");

        let proxy = carrot.get_relationship("proxyPrim").unwrap();
        assert!(proxy.targets().is_empty());

        let coin = stage.get_prim("/World/Coin").unwrap();
        assert_eq!(coin.get_relationship("targets").unwrap().targets().len(), 2);
    }

    #[test]
    fn test_variant_contents_not_composed() {
        let stage = level();
        let coin = stage.get_prim("/World/Coin").unwrap();
        assert!(coin.get_attribute("sparkle:entity:id").is_none());
    }

    #[test]
    fn test_empty_layer() {
        let stage = parse_usda("#usda 1.0\n").unwrap();
        assert!(stage.is_empty());
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_usda("#usda 1.0\ndef Xform \"World\" {\n").unwrap_err();
        assert!(matches!(err, SparkleError::ParseError(_)));
    }

    #[test]
    fn test_duplicate_prim_is_an_error() {
        let err = parse_usda("def \"A\" {}\ndef \"A\" {}\n").unwrap_err();
        assert!(matches!(err, SparkleError::DuplicatePrim(_)));
    }

    #[test]
    fn test_invalid_prim_name() {
        let err = parse_usda("def \"bad name\" {}\n").unwrap_err();
        assert!(matches!(err, SparkleError::InvalidPath(_)));
    }

    #[test]
    fn test_blocked_value() {
        let stage = parse_usda("def \"A\" {\n    float speed = None\n}\n").unwrap();
        let attr = stage.get_prim("/A").unwrap().get_attribute("speed").unwrap();
        assert!(!attr.has_value());
    }
}
