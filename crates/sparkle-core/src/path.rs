//! Scene graph prim paths

use crate::error::{Result, SparkleError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An absolute prim path such as `/World/Enemies/Carrot_01`.
///
/// Paths uniquely identify a prim within a loaded stage. Every segment must
/// start with a letter or underscore and continue with alphanumerics or
/// underscores. The pseudo-root `/` is not a prim path.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrimPath(String);

impl PrimPath {
    /// Parse and validate an absolute prim path
    pub fn parse(path: &str) -> Result<Self> {
        let rest = path
            .strip_prefix('/')
            .ok_or_else(|| SparkleError::InvalidPath(format!("'{}' is not absolute", path)))?;

        if rest.is_empty() {
            return Err(SparkleError::InvalidPath(
                "the pseudo-root '/' is not a prim".to_string(),
            ));
        }

        for segment in rest.split('/') {
            if !is_valid_name(segment) {
                return Err(SparkleError::InvalidPath(format!(
                    "'{}' has invalid segment '{}'",
                    path, segment
                )));
            }
        }

        Ok(Self(path.to_string()))
    }

    /// Build a root-level path from a single prim name
    pub fn root(name: &str) -> Result<Self> {
        Self::parse(&format!("/{}", name))
    }

    /// Append a child name to this path
    pub fn child(&self, name: &str) -> Result<Self> {
        if !is_valid_name(name) {
            return Err(SparkleError::InvalidPath(format!(
                "'{}' is not a valid prim name",
                name
            )));
        }
        Ok(Self(format!("{}/{}", self.0, name)))
    }

    /// The last path segment
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// The parent path, or `None` for root-level prims
    pub fn parent(&self) -> Option<PrimPath> {
        let idx = self.0.rfind('/')?;
        if idx == 0 {
            None
        } else {
            Some(Self(self.0[..idx].to_string()))
        }
    }

    /// Number of segments (root-level prims have depth 1)
    pub fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A prim name: `[A-Za-z_][A-Za-z0-9_]*`
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimPath({})", self.0)
    }
}

impl AsRef<str> for PrimPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PrimPath {
    type Error = SparkleError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PrimPath> for String {
    fn from(path: PrimPath) -> Self {
        path.0
    }
}
