//! Serialized form of mapping specifications
//!
//! A mapping document is a JSON (or YAML) object with an optional
//! `config` section and an ordered `map` section:
//!
//! ```json
//! {
//!   "config": { "set_undefined": false },
//!   "map": {
//!     "user.name": "profile.displayName",
//!     "user.active": "!!profile.enabled",
//!     "user.age": { "path": "profile.age", "coercion": "number" },
//!     "orders[]": { "key": "profile.orders[]", "map": { "id": "orderId" } }
//!   }
//! }
//! ```
//!
//! Entry order is document order. Transforms have no serialized form.

use super::{Iteration, MappingEntry, MappingSpec, RefactorConfig, SourcePath, TargetDescriptor, TargetPath};
use crate::coercion::Coercion;
use crate::path::{value_kind, Path};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const ITERATION_FIELDS: [&str; 3] = ["key", "map", "config"];
const EXPLICIT_FIELDS: [&str; 2] = ["path", "coercion"];

/// Raw mapping document before path parsing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingDocument {
    #[serde(default)]
    pub config: RefactorConfig,
    pub map: Map<String, Value>,
}

impl MappingDocument {
    /// Parse every path and descriptor into a checked specification
    pub fn into_spec(self) -> Result<MappingSpec> {
        let spec = build_spec(&self.map, self.config)?;
        spec.validate()?;
        Ok(spec)
    }
}

impl MappingSpec {
    /// Load a specification from a mapping document value
    pub fn from_value(value: Value) -> Result<Self> {
        let document: MappingDocument = serde_json::from_value(value)?;
        document.into_spec()
    }

    /// Load a specification from mapping document JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: MappingDocument = serde_json::from_str(text)?;
        document.into_spec()
    }
}

impl<'de> Deserialize<'de> for MappingSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = MappingDocument::deserialize(deserializer)?;
        document.into_spec().map_err(serde::de::Error::custom)
    }
}

fn build_spec(map: &Map<String, Value>, config: RefactorConfig) -> Result<MappingSpec> {
    let entries = map
        .iter()
        .map(|(source, descriptor)| -> Result<MappingEntry> {
            Ok(MappingEntry {
                source: SourcePath::parse(source)?,
                target: build_descriptor(source, descriptor)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MappingSpec::new(entries, config))
}

fn build_descriptor(source: &str, descriptor: &Value) -> Result<TargetDescriptor> {
    match descriptor {
        Value::String(target) => Ok(TargetDescriptor::Plain(TargetPath::parse(target)?)),
        Value::Object(fields) if fields.contains_key("map") => build_iteration(source, fields),
        Value::Object(fields) if fields.contains_key("path") => build_explicit(source, fields),
        Value::Object(_) => Err(Error::document(format!(
            "descriptor for '{}' needs either 'path' or 'key' and 'map'",
            source
        ))),
        other => Err(Error::document(format!(
            "descriptor for '{}' must be a string or an object, found {}",
            source,
            value_kind(other)
        ))),
    }
}

fn build_iteration(source: &str, fields: &Map<String, Value>) -> Result<TargetDescriptor> {
    check_fields(source, fields, &ITERATION_FIELDS)?;

    let key = string_field(source, fields, "key")?;
    let map = fields
        .get("map")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::document(format!("'map' of '{}' must be an object", source)))?;
    let config = match fields.get("config") {
        Some(config) => serde_json::from_value(config.clone())?,
        None => RefactorConfig::default(),
    };

    Ok(TargetDescriptor::Iteration(Iteration {
        key: Path::parse(key)?,
        map: build_spec(map, config)?,
    }))
}

fn build_explicit(source: &str, fields: &Map<String, Value>) -> Result<TargetDescriptor> {
    check_fields(source, fields, &EXPLICIT_FIELDS)?;

    let path = string_field(source, fields, "path")?;
    let coercion: Coercion = match fields.get("coercion") {
        Some(coercion) => serde_json::from_value(coercion.clone())?,
        None => Coercion::None,
    };

    Ok(TargetDescriptor::Plain(TargetPath::new(path)?.with_coercion(coercion)))
}

fn string_field<'a>(source: &str, fields: &'a Map<String, Value>, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::document(format!("'{}' of '{}' must be a string", name, source)))
}

fn check_fields(source: &str, fields: &Map<String, Value>, allowed: &[&str]) -> Result<()> {
    match fields.keys().find(|field| !allowed.contains(&field.as_str())) {
        Some(field) => Err(Error::document(format!(
            "unknown field '{}' in descriptor for '{}', expected one of {:?}",
            field, source, allowed
        ))),
        None => Ok(()),
    }
}
