//! Shared utilities for command handlers

use crate::error::{Error, Result};
use jsonrefactor_core::MappingSpec;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Whether a path names a YAML file
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Load a JSON or YAML document from disk
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            reason: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Load and check a mapping document
pub fn load_mapping(path: &Path) -> Result<MappingSpec> {
    let document = load_document(path)?;
    Ok(MappingSpec::from_value(document)?)
}

/// Read the input record from a file, or JSON from `stdin` when no file is given
pub fn read_input(path: Option<&Path>, mut stdin: impl Read) -> Result<Value> {
    if let Some(path) = path {
        return load_document(path);
    }

    let mut content = String::new();
    stdin.read_to_string(&mut content)?;
    debug!("Read {} bytes from stdin", content.len());

    serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
        path: "<stdin>".into(),
        expected: "JSON".to_string(),
        reason: e.to_string(),
    })
}
