//! Path resolution against JSON value trees
//!
//! Resolution walks a parsed [`Path`] and stops one step short of the end:
//! the result is the container that owns the final value plus the key
//! within it. Reads never modify the tree; writes fabricate the missing
//! containers ("crumbs") along the way.

use super::error::{value_kind, PathError, MAX_ARRAY_PADDING};
use super::parser::{IndexSpec, Path, Segment};
use serde_json::{Map, Value};
use std::fmt;

/// Key within a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'p> {
    /// Property name
    Name(&'p str),
    /// Sequence position
    Index(usize),
}

impl Key<'_> {
    /// Position this key addresses in a sequence, if any
    ///
    /// Names made only of ASCII digits address the same position their
    /// numeric value does.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(name) if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) => {
                name.parse().ok()
            }
            Key::Name(_) => None,
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Read-only resolution result
#[derive(Debug, Clone, Copy)]
pub struct Location<'a, 'p> {
    parent: &'a Value,
    key: Key<'p>,
}

impl<'a, 'p> Location<'a, 'p> {
    /// The container owning the addressed value
    pub fn parent(&self) -> &'a Value {
        self.parent
    }

    /// The final key within the parent
    pub fn key(&self) -> Key<'p> {
        self.key
    }

    /// The value stored at the location, `None` if nothing is there
    pub fn value(&self) -> Option<&'a Value> {
        child(self.parent, self.key)
    }
}

/// Writable resolution result with fabricated crumbs in place
#[derive(Debug)]
pub struct LocationMut<'a, 'p> {
    parent: &'a mut Value,
    key: Key<'p>,
    path: &'p Path,
}

impl<'a, 'p> LocationMut<'a, 'p> {
    /// The container that will receive the value
    pub fn parent(&self) -> &Value {
        &*self.parent
    }

    /// The final key within the parent
    pub fn key(&self) -> Key<'p> {
        self.key
    }

    /// Store `value` at the location, replacing whatever was there
    pub fn write(self, value: Value) -> Result<(), PathError> {
        let segment = self.path.segments().last().map(ToString::to_string).unwrap_or_default();
        let slot = slot_mut(self.parent, self.key, self.path, &segment)?;
        *slot = value;
        Ok(())
    }
}

/// Resolve `path` for reading
///
/// Returns `None` when the walk leaves the structure: a missing
/// intermediate value, a scalar where a container is needed, or a final
/// parent that is not an object or array.
pub fn resolve<'a, 'p>(root: &'a Value, path: &'p Path) -> Option<Location<'a, 'p>> {
    let segments = path.segments();
    let mut parent = root;

    for (idx, segment) in segments.iter().enumerate() {
        let mut key = Key::Name(&segment.name);

        if let Some(index) = segment.index {
            parent = child(parent, key)?;
            key = match index {
                IndexSpec::At(i) => Key::Index(i),
                IndexSpec::Append => Key::Index(parent.as_array()?.len()),
            };
        }

        if idx + 1 < segments.len() {
            parent = child(parent, key)?;
        } else if is_container(parent) {
            return Some(Location { parent, key });
        }
    }

    None
}

/// Resolve `path` for writing, fabricating missing containers
///
/// Array-marked segments replace any non-array value at their name with
/// an empty array. Intermediate segments replace a missing or `null`
/// value with an empty object; any other scalar in the way is a
/// [`PathError::Conflict`].
pub fn resolve_mut<'a, 'p>(root: &'a mut Value, path: &'p Path) -> Result<LocationMut<'a, 'p>, PathError> {
    let segments = path.segments();
    let last = segments.len().saturating_sub(1);
    let mut parent = root;

    for (idx, segment) in segments.iter().enumerate() {
        let mut key = Key::Name(&segment.name);

        if let Some(index) = segment.index {
            let slot = slot_mut(parent, key, path, &segment.name)?;
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            key = match index {
                IndexSpec::At(i) => Key::Index(i),
                IndexSpec::Append => Key::Index(slot.as_array().map_or(0, Vec::len)),
            };
            parent = slot;
        }

        if idx == last {
            return Ok(LocationMut { parent, key, path });
        }

        let slot = slot_mut(parent, key, path, &segment_label(segment))?;
        match slot {
            Value::Null => *slot = Value::Object(Map::new()),
            Value::Object(_) | Value::Array(_) => {}
            _ => {
                return Err(PathError::conflict(path.as_str(), segment_label(segment), value_kind(slot)));
            }
        }
        parent = slot;
    }

    Err(PathError::syntax("Empty path expression", 0, path.as_str()))
}

fn segment_label(segment: &Segment) -> String {
    segment.to_string()
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn child<'a>(parent: &'a Value, key: Key<'_>) -> Option<&'a Value> {
    match parent {
        Value::Object(map) => match key {
            Key::Name(name) => map.get(name),
            Key::Index(i) => map.get(&i.to_string()),
        },
        Value::Array(items) => items.get(key.as_index()?),
        _ => None,
    }
}

/// Mutable slot for `key` in `parent`, created as `null` when missing
///
/// Arrays are padded with `null` up to the index, but never by
/// [`MAX_ARRAY_PADDING`] or more elements.
fn slot_mut<'a>(parent: &'a mut Value, key: Key<'_>, path: &Path, segment: &str) -> Result<&'a mut Value, PathError> {
    match parent {
        Value::Object(map) => Ok(map.entry(key.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = key
                .as_index()
                .ok_or_else(|| PathError::conflict(path.as_str(), segment, "an array"))?;
            let len = items.len();
            if index.saturating_sub(len) >= MAX_ARRAY_PADDING {
                return Err(PathError::index_out_of_range(path.as_str(), segment, index, len));
            }
            if len <= index {
                items.resize(index + 1, Value::Null);
            }
            items
                .get_mut(index)
                .ok_or_else(|| PathError::index_out_of_range(path.as_str(), segment, index, len))
        }
        other => Err(PathError::conflict(path.as_str(), segment, value_kind(other))),
    }
}
