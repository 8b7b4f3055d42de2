//! Generator configuration.
//!
//! Layered lowest to highest: built-in defaults, a TOML file, the options
//! block of the host request, then command-line flags.

use crate::drivers::Engine;
use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What to do when a single query fails to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Leave the query out and report it.
    Skip,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Abort => write!(f, "abort"),
            FailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            _ => Err(GenError::Config(format!(
                "invalid failure policy '{}'. Expected: abort or skip",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: Engine,
    /// Namespace of the generated file.
    pub namespace: String,
    /// Class holding the generated methods.
    pub class_name: String,
    /// Name of the generated file.
    pub output_file: String,
    pub on_error: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            namespace: "Generated".to_string(),
            class_name: "Queries".to_string(),
            output_file: "Queries.cs".to_string(),
            on_error: FailurePolicy::default(),
        }
    }
}

/// Partial configuration, as carried by a request or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub engine: Option<Engine>,
    pub namespace: Option<String>,
    pub class_name: Option<String>,
    pub output_file: Option<String>,
    pub on_error: Option<FailurePolicy>,
}

impl Config {
    /// Project-local config file name.
    pub const FILE_NAME: &'static str = "sqlc-csharp.toml";

    pub fn from_toml(content: &str) -> GenResult<Self> {
        toml::from_str(content).map_err(|e| GenError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> GenResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Find a config file: `dir/sqlc-csharp.toml`, then the user config
    /// directory's `sqlc-csharp/config.toml`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        let local = dir.join(Self::FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|d| d.join("sqlc-csharp").join("config.toml"))
            .filter(|p| p.is_file())
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(engine) = overrides.engine {
            self.engine = engine;
        }
        if let Some(ref namespace) = overrides.namespace {
            self.namespace = namespace.clone();
        }
        if let Some(ref class_name) = overrides.class_name {
            self.class_name = class_name.clone();
        }
        if let Some(ref output_file) = overrides.output_file {
            self.output_file = output_file.clone();
        }
        if let Some(on_error) = overrides.on_error {
            self.on_error = on_error;
        }
    }

    pub fn validate(&self) -> GenResult<()> {
        if !self.namespace.split('.').all(is_identifier) {
            return Err(GenError::Config(format!(
                "invalid namespace '{}'",
                self.namespace
            )));
        }
        if !is_identifier(&self.class_name) {
            return Err(GenError::Config(format!(
                "invalid class name '{}'",
                self.class_name
            )));
        }
        let file = self.output_file.trim();
        if file.is_empty() || file.contains(['/', '\\']) || file == "." || file == ".." {
            return Err(GenError::Config(format!(
                "invalid output file name '{}'",
                self.output_file
            )));
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.engine, Engine::MySql);
        assert_eq!(config.on_error, FailurePolicy::Abort);
        config.validate().unwrap();
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
            engine = "postgresql"
            namespace = "Acme.Data"
            on_error = "skip"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine, Engine::Postgres);
        assert_eq!(config.namespace, "Acme.Data");
        assert_eq!(config.class_name, "Queries");
        assert_eq!(config.on_error, FailurePolicy::Skip);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = Config::from_toml("engin = \"mysql\"").unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn test_from_toml_rejects_unknown_engine() {
        assert!(Config::from_toml("engine = \"oracle\"").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply(&ConfigOverrides {
            engine: Some(Engine::Sqlite),
            class_name: Some("Db".to_string()),
            ..Default::default()
        });
        assert_eq!(config.engine, Engine::Sqlite);
        assert_eq!(config.class_name, "Db");
        assert_eq!(config.namespace, "Generated");
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let bad = [
            Config {
                namespace: "Acme..Data".to_string(),
                ..Default::default()
            },
            Config {
                class_name: "1Queries".to_string(),
                ..Default::default()
            },
            Config {
                output_file: "../Queries.cs".to_string(),
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(GenError::Config(_))));
        }
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!("SKIP".parse::<FailurePolicy>().unwrap(), FailurePolicy::Skip);
        assert!("retry".parse::<FailurePolicy>().is_err());
    }
}
