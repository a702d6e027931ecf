//! Dotted path expressions and their resolution
//!
//! This module parses path expressions such as `order.lines[2].sku` or
//! `out.items[]` and resolves them against JSON value trees, either for
//! reading ([`resolve`]) or for writing with fabrication of missing
//! containers ([`resolve_mut`]).

pub mod error;
pub mod parser;
pub mod resolver;

pub use error::{value_kind, PathError, MAX_ARRAY_PADDING};
pub use parser::{IndexSpec, Path, Segment};
pub use resolver::{resolve, resolve_mut, Key, Location, LocationMut};

use serde_json::Value;

/// Read the value at `path`, if the path resolves and holds something
pub fn lookup<'a>(root: &'a Value, path: &str) -> Result<Option<&'a Value>, PathError> {
    let path = Path::parse(path)?;
    Ok(resolve(root, &path).and_then(|location| location.value()))
}

/// Write `value` at `path`, fabricating missing containers
pub fn assign(root: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    let path = Path::parse(path)?;
    resolve_mut(root, &path)?.write(value)
}
