//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments, which take precedence over both

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use jsonrefactor_core::RefactorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults for every mapping run
    pub refactor: RefactorConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json-pretty".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

/// Supported configuration file syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Toml,
    Yaml,
    Json,
}

impl FileKind {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::Toml,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = match FileKind::of(path) {
            FileKind::Toml => toml::from_str(&content)?,
            FileKind::Yaml => serde_yaml::from_str(&content)?,
            FileKind::Json => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let names = [".jsonrefactor.toml", ".jsonrefactor.yaml", ".jsonrefactor.json"];

        // Current directory
        let mut paths: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("jsonrefactor");
            paths.push(app_dir.join("config.toml"));
            paths.push(app_dir.join("config.yaml"));
            paths.push(app_dir.join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.extend(names.iter().map(|name| home_dir.join(name)));
        }

        paths
    }

    /// Reject values the rest of the CLI cannot interpret
    pub fn validate(&self) -> Result<()> {
        if OutputFormat::from_name(&self.output.format).is_none() {
            return Err(Error::config(format!(
                "unknown output format '{}', expected json, json-pretty or yaml",
                self.output.format
            )));
        }
        if !matches!(self.logging.format.as_str(), "compact" | "full" | "json") {
            return Err(Error::config(format!(
                "unknown log format '{}', expected compact, full or json",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// The configured output format
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_name(&self.output.format).unwrap_or(OutputFormat::JsonPretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.refactor, RefactorConfig::default());
        assert_eq!(config.output_format(), OutputFormat::JsonPretty);
        assert_eq!(config.logging.format, "compact");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[refactor]\nset_undefined = true\n\n[output]\nformat = \"yaml\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_with_file(Some(&path)).unwrap();
        assert!(config.refactor.set_undefined);
        assert!(!config.refactor.strict_paths);
        assert_eq!(config.output_format(), OutputFormat::Yaml);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.output.color);
    }

    #[test]
    fn test_load_yaml_and_json() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join("config.yml");
        fs::write(&yaml, "refactor:\n  strict_paths: true\n").unwrap();
        assert!(Config::from_file(&yaml).unwrap().refactor.strict_paths);

        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"output": {"format": "json", "color": false}}"#).unwrap();
        let config = Config::from_file(&json).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(!config.output.color);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_with_file(Some(Path::new("/nonexistent/jsonrefactor.toml"))).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_rejects_unknown_values() {
        let dir = TempDir::new().unwrap();

        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nformat = \"human\"\n").unwrap();
        assert!(matches!(Config::load_with_file(Some(&path)), Err(Error::Config(_))));

        fs::write(&path, "[unknown]\nkey = 1\n").unwrap();
        assert!(matches!(Config::load_with_file(Some(&path)), Err(Error::Toml(_))));

        fs::write(&path, "[refactor]\nsetUndefined = true\n").unwrap();
        assert!(matches!(Config::load_with_file(Some(&path)), Err(Error::Toml(_))));
    }
}
