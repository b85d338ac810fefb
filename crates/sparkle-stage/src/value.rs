//! Attribute value types

use std::fmt;
use std::str::FromStr;

use sparkle_core::SparkleError;

/// Declared type of an attribute, named as in USD (`float`, `token`, `matrix4d`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Int64,
    UInt,
    Half,
    Float,
    Double,
    String,
    Token,
    Asset,
    Matrix4d,
    Array(Box<ValueType>),
    /// Any other scalar type name (`float3`, `color3f`, `quath`, ...)
    Other(String),
}

impl ValueType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Int
                | ValueType::Int64
                | ValueType::UInt
                | ValueType::Half
                | ValueType::Float
                | ValueType::Double
        )
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ValueType::Array(_))
    }

    /// The element type for arrays, the type itself otherwise
    pub fn scalar(&self) -> &ValueType {
        match self {
            ValueType::Array(inner) => inner.scalar(),
            other => other,
        }
    }

    /// Best-guess type for an untyped value
    pub fn infer(value: &Value) -> ValueType {
        match value {
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Float,
            Value::String(_) | Value::Path(_) => ValueType::String,
            Value::Asset(_) => ValueType::Asset,
            Value::List(items) => {
                let element = items.first().map(ValueType::infer).unwrap_or(ValueType::Float);
                ValueType::Array(Box::new(element))
            }
        }
    }
}

impl FromStr for ValueType {
    type Err = SparkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(element) = s.strip_suffix("[]") {
            return Ok(ValueType::Array(Box::new(element.parse()?)));
        }

        let valid = s
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic())
            .unwrap_or(false)
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(SparkleError::InvalidValueType(s.to_string()));
        }

        Ok(match s {
            "bool" => ValueType::Bool,
            "int" => ValueType::Int,
            "int64" => ValueType::Int64,
            "uint" => ValueType::UInt,
            "half" => ValueType::Half,
            "float" => ValueType::Float,
            "double" => ValueType::Double,
            "string" => ValueType::String,
            "token" => ValueType::Token,
            "asset" => ValueType::Asset,
            "matrix4d" => ValueType::Matrix4d,
            other => ValueType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => f.write_str("bool"),
            ValueType::Int => f.write_str("int"),
            ValueType::Int64 => f.write_str("int64"),
            ValueType::UInt => f.write_str("uint"),
            ValueType::Half => f.write_str("half"),
            ValueType::Float => f.write_str("float"),
            ValueType::Double => f.write_str("double"),
            ValueType::String => f.write_str("string"),
            ValueType::Token => f.write_str("token"),
            ValueType::Asset => f.write_str("asset"),
            ValueType::Matrix4d => f.write_str("matrix4d"),
            ValueType::Array(inner) => write!(f, "{}[]", inner),
            ValueType::Other(name) => f.write_str(name),
        }
    }
}

/// An authored attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    /// Strings and tokens
    String(String),
    Asset(String),
    Path(String),
    /// Arrays and tuples
    List(Vec<Value>),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Asset(a) => write!(f, "@{}@", a),
            Value::Path(p) => write!(f, "<{}>", p),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
