//! Mapping specification types
//!
//! A [`MappingSpec`] is an ordered list of [`MappingEntry`] values, each
//! pairing a [`SourcePath`] with a [`TargetDescriptor`], plus a
//! [`RefactorConfig`] that sits beside the entries rather than among them.
//!
//! Specifications are built either in code through [`MappingSpecBuilder`]
//! or loaded from a mapping document (see [`document`]).

pub mod builder;
pub mod document;

pub use builder::MappingSpecBuilder;
pub use document::MappingDocument;

use crate::coercion::Coercion;
use crate::path::{Path, PathError};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Trailing marker on a source path requesting per-element iteration
pub const ITERATION_MARKER: &str = "[]";

/// Specification-level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefactorConfig {
    /// Write absent source values as `null` instead of skipping them
    pub set_undefined: bool,
    /// Fail on source paths that cannot be addressed instead of treating
    /// them as absent
    pub strict_paths: bool,
}

/// Source side of an entry: a path plus the iteration flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    raw: String,
    path: Path,
    iterate: bool,
}

impl SourcePath {
    /// Parse a source expression, stripping one trailing `[]` marker
    pub fn parse(expression: &str) -> std::result::Result<Self, PathError> {
        let (remainder, iterate) = match expression.strip_suffix(ITERATION_MARKER) {
            Some(rest) => (rest, true),
            None => (expression, false),
        };

        Ok(Self {
            raw: expression.to_string(),
            path: Path::parse(remainder)?,
            iterate,
        })
    }

    /// The path without the iteration marker
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the resolved value is iterated element by element
    pub fn iterate(&self) -> bool {
        self.iterate
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for SourcePath {
    type Err = PathError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Destination path with the coercion applied before writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPath {
    pub path: Path,
    pub coercion: Coercion,
}

impl TargetPath {
    /// A destination path without coercion; sigils are not interpreted
    pub fn new(path: &str) -> std::result::Result<Self, PathError> {
        Ok(Self {
            path: Path::parse(path)?,
            coercion: Coercion::None,
        })
    }

    /// Parse the sigil form (`!!path`, `!path`, `+path` or `path`)
    pub fn parse(expression: &str) -> std::result::Result<Self, PathError> {
        let (coercion, path) = Coercion::split_sigil(expression);
        Ok(Self {
            path: Path::parse(path)?,
            coercion,
        })
    }

    /// Replace the coercion
    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }
}

impl FromStr for TargetPath {
    type Err = PathError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.coercion.sigil(), self.path)
    }
}

/// Output of a transform: where to write and what
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// Destination in sigil form; coercion sigils apply
    pub key: String,
    pub value: Value,
}

impl Transformed {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

type TransformFn = dyn Fn(&Value) -> Option<Transformed> + Send + Sync;

/// User-supplied value transform
///
/// Returning `None` means the entry produces no output.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<Transformed> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the transform
    pub fn call(&self, value: &Value) -> Option<Transformed> {
        (self.0)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(<fn>)")
    }
}

/// Per-element sub-mapping for iteration entries
#[derive(Debug, Clone)]
pub struct Iteration {
    /// Where each element's result is written, usually an append path
    pub key: Path,
    /// Mapping applied to every element
    pub map: MappingSpec,
}

/// What to do with a value read from the source
#[derive(Debug, Clone)]
pub enum TargetDescriptor {
    /// Write at a destination path, with optional coercion
    Plain(TargetPath),
    /// Hand the value to a transform that picks key and value
    Transform(Transform),
    /// Refactor each element of a sequence through a nested mapping
    Iteration(Iteration),
}

impl TargetDescriptor {
    /// Short kind name, used in logs and diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "plain",
            Self::Transform(_) => "transform",
            Self::Iteration(_) => "iteration",
        }
    }

    pub fn is_iteration(&self) -> bool {
        matches!(self, Self::Iteration(_))
    }
}

impl From<TargetPath> for TargetDescriptor {
    fn from(path: TargetPath) -> Self {
        Self::Plain(path)
    }
}

impl From<Transform> for TargetDescriptor {
    fn from(transform: Transform) -> Self {
        Self::Transform(transform)
    }
}

impl From<Iteration> for TargetDescriptor {
    fn from(iteration: Iteration) -> Self {
        Self::Iteration(iteration)
    }
}

/// One source-to-target pairing
#[derive(Debug, Clone)]
pub struct MappingEntry {
    pub source: SourcePath,
    pub target: TargetDescriptor,
}

impl MappingEntry {
    pub fn new(source: SourcePath, target: impl Into<TargetDescriptor>) -> Self {
        Self {
            source,
            target: target.into(),
        }
    }

    /// Check that the iteration marker and the descriptor kind agree
    pub fn validate(&self) -> Result<()> {
        match (self.source.iterate(), &self.target) {
            (true, TargetDescriptor::Iteration(iteration)) => iteration.map.validate(),
            (true, other) => Err(Error::descriptor_mismatch(
                self.source.as_str(),
                format!("iteration source requires an iteration descriptor, got {}", other.kind()),
            )),
            (false, TargetDescriptor::Iteration(_)) => Err(Error::descriptor_mismatch(
                self.source.as_str(),
                format!("iteration descriptor requires a source ending in '{}'", ITERATION_MARKER),
            )),
            (false, _) => Ok(()),
        }
    }
}

/// Ordered mapping specification
#[derive(Debug, Clone, Default)]
pub struct MappingSpec {
    entries: Vec<MappingEntry>,
    config: RefactorConfig,
}

impl MappingSpec {
    pub fn new(entries: Vec<MappingEntry>, config: RefactorConfig) -> Self {
        Self { entries, config }
    }

    /// Start a fluent builder
    pub fn builder() -> MappingSpecBuilder {
        MappingSpecBuilder::new()
    }

    /// Entries in processing order
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn config(&self) -> &RefactorConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: RefactorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry, recursing into nested mappings
    pub fn validate(&self) -> Result<()> {
        self.entries.iter().try_for_each(MappingEntry::validate)
    }
}
