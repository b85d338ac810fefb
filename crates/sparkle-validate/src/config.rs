//! Layered validator configuration
//!
//! Config is loaded with these layers of precedence (highest wins):
//! 1. Environment variable: `SPARKLE_DISABLED_RULES` (comma separated, appended)
//! 2. Explicit config file passed by the caller (replaces the project file)
//! 3. Project-local: `.sparkle/validate.toml`
//! 4. Built-in defaults

use crate::rules::{PerformanceLimits, DEFAULT_MAX_REASONABLE_SPEED};
use serde::{Deserialize, Serialize};
use sparkle_core::{Result, SparkleError};
use std::path::{Path, PathBuf};

/// Environment variable holding extra rule ids to disable
pub const DISABLED_RULES_ENV: &str = "SPARKLE_DISABLED_RULES";

/// Project-local config location, relative to the project root
pub const PROJECT_CONFIG_PATH: &str = ".sparkle/validate.toml";

/// `[rules]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// `[movement]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    #[serde(default = "default_max_speed")]
    pub max_reasonable_speed: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_reasonable_speed: default_max_speed(),
        }
    }
}

fn default_max_speed() -> f64 {
    DEFAULT_MAX_REASONABLE_SPEED
}

/// `[performance]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_max_applied_schemas")]
    pub max_applied_schemas: usize,
    #[serde(default = "default_max_attributes")]
    pub max_attributes: usize,
    #[serde(default = "default_max_expensive_attributes")]
    pub max_expensive_attributes: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_applied_schemas: default_max_applied_schemas(),
            max_attributes: default_max_attributes(),
            max_expensive_attributes: default_max_expensive_attributes(),
        }
    }
}

fn default_max_applied_schemas() -> usize {
    PerformanceLimits::default().max_applied_schemas
}
fn default_max_attributes() -> usize {
    PerformanceLimits::default().max_attributes
}
fn default_max_expensive_attributes() -> usize {
    PerformanceLimits::default().max_expensive_attributes
}

impl PerformanceConfig {
    pub fn limits(&self) -> PerformanceLimits {
        PerformanceLimits {
            max_applied_schemas: self.max_applied_schemas,
            max_attributes: self.max_attributes,
            max_expensive_attributes: self.max_expensive_attributes,
        }
    }
}

/// Resolved validator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl ValidatorConfig {
    /// Load config with layered precedence: defaults < project < explicit file < env
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_file(path)?,
            None => {
                let local_path = Self::project_config_path(project_root);
                if local_path.exists() {
                    log::debug!("Using project config {}", local_path.display());
                    Self::load_file(&local_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(value) = std::env::var(DISABLED_RULES_ENV) {
            config.disable_from_list(&value);
        }

        Ok(config)
    }

    /// Load config from a specific file path only, without environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_file(path)
    }

    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SparkleError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_PATH)
    }

    /// Append comma separated rule ids to the disabled list, skipping blanks and repeats
    pub fn disable_from_list(&mut self, list: &str) {
        for id in list.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            self.disable(id);
        }
    }

    pub fn disable(&mut self, rule_id: &str) {
        if !self.is_disabled(rule_id) {
            self.rules.disabled.push(rule_id.to_string());
        }
    }

    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.rules.disabled.iter().any(|id| id == rule_id)
    }

    fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SparkleError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            SparkleError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}
