//! Sparkle Core - Foundational types for the Sparkle schema tools
//!
//! This crate provides the types that all other Sparkle crates depend on:
//! - `PrimPath` - Absolute, validated scene graph paths
//! - Error types and Result alias

mod error;
mod path;

pub use error::{Result, SparkleError};
pub use path::PrimPath;
