//! Builder for mapping specifications
//!
//! Paths are collected as strings and parsed in [`MappingSpecBuilder::build`],
//! so the first malformed expression is reported there.

use super::{
    Iteration, MappingEntry, MappingSpec, RefactorConfig, SourcePath, TargetDescriptor, TargetPath,
    Transform, Transformed, ITERATION_MARKER,
};
use crate::coercion::Coercion;
use crate::path::Path;
use crate::Result;
use serde_json::Value;

enum PendingTarget {
    Sigil(String),
    Coerced(String, Coercion),
    Transform(Transform),
    Iteration(String, MappingSpec),
    Ready(TargetDescriptor),
}

/// Fluent builder for [`MappingSpec`]
pub struct MappingSpecBuilder {
    entries: Vec<(String, PendingTarget)>,
    config: RefactorConfig,
}

impl MappingSpecBuilder {
    /// Create an empty builder with default configuration
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            config: RefactorConfig::default(),
        }
    }

    /// Map `source` to a destination in sigil form (`!!a`, `!a`, `+a`, `a`)
    pub fn map(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.entries
            .push((source.into(), PendingTarget::Sigil(target.into())));
        self
    }

    /// Map `source` to a plain destination path with an explicit coercion
    pub fn coerce(mut self, source: impl Into<String>, target: impl Into<String>, coercion: Coercion) -> Self {
        self.entries
            .push((source.into(), PendingTarget::Coerced(target.into(), coercion)));
        self
    }

    /// Map `source` through a transform closure
    pub fn transform<F>(mut self, source: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Option<Transformed> + Send + Sync + 'static,
    {
        self.entries
            .push((source.into(), PendingTarget::Transform(Transform::new(f))));
        self
    }

    /// Refactor every element of the sequence at `source` through `map`,
    /// writing each result at `key`
    ///
    /// The iteration marker is appended to `source` when missing.
    pub fn iterate(mut self, source: impl Into<String>, key: impl Into<String>, map: MappingSpec) -> Self {
        let mut source = source.into();
        if !source.ends_with(ITERATION_MARKER) {
            source.push_str(ITERATION_MARKER);
        }
        self.entries
            .push((source, PendingTarget::Iteration(key.into(), map)));
        self
    }

    /// Add an already constructed descriptor
    pub fn entry(mut self, source: impl Into<String>, target: impl Into<TargetDescriptor>) -> Self {
        self.entries
            .push((source.into(), PendingTarget::Ready(target.into())));
        self
    }

    /// Write absent values as `null`
    pub fn set_undefined(mut self, enabled: bool) -> Self {
        self.config.set_undefined = enabled;
        self
    }

    /// Treat unresolvable source paths as errors
    pub fn strict_paths(mut self, enabled: bool) -> Self {
        self.config.strict_paths = enabled;
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: RefactorConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse every path and check the entries
    pub fn build(self) -> Result<MappingSpec> {
        let mut entries = Vec::with_capacity(self.entries.len());

        for (source, pending) in self.entries {
            let source = SourcePath::parse(&source)?;
            let target = match pending {
                PendingTarget::Sigil(target) => TargetDescriptor::Plain(TargetPath::parse(&target)?),
                PendingTarget::Coerced(target, coercion) => {
                    TargetDescriptor::Plain(TargetPath::new(&target)?.with_coercion(coercion))
                }
                PendingTarget::Transform(transform) => TargetDescriptor::Transform(transform),
                PendingTarget::Iteration(key, map) => TargetDescriptor::Iteration(Iteration {
                    key: Path::parse(&key)?,
                    map,
                }),
                PendingTarget::Ready(descriptor) => descriptor,
            };
            entries.push(MappingEntry { source, target });
        }

        let spec = MappingSpec::new(entries, self.config);
        spec.validate()?;
        Ok(spec)
    }
}

impl Default for MappingSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}
