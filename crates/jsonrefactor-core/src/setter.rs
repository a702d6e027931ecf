//! Writing values into the target tree
//!
//! The setter decides whether and what to write (undefined policy,
//! transforms, coercions) and then writes an owned copy through
//! [`resolve_mut`], fabricating missing containers. Since every write
//! stores a fresh `Value`, later changes to the source never show up in
//! the target.

use crate::path::{resolve_mut, Path};
use crate::spec::{TargetDescriptor, TargetPath, Transformed};
use crate::Result;
use serde_json::Value;

/// Write `value` into `target` as directed by `descriptor`
///
/// Returns whether anything was written. An absent value is skipped
/// unless `set_undefined` is set, in which case `null` is written at the
/// descriptor's path without coercion; a transform never sees an absent
/// value.
///
/// For an iteration descriptor the value is stored as is at the
/// descriptor's key. The mapper only passes element results here; an
/// absent source for an iteration entry is skipped before `set` is
/// reached, so the forced-`null` write for iteration descriptors only
/// happens when `set` is called directly.
pub fn set(
    target: &mut Value,
    descriptor: &TargetDescriptor,
    value: Option<&Value>,
    set_undefined: bool,
) -> Result<bool> {
    let Some(value) = value else {
        if !set_undefined {
            return Ok(false);
        }
        return match descriptor {
            TargetDescriptor::Plain(target_path) => write(target, &target_path.path, Value::Null).map(|_| true),
            TargetDescriptor::Iteration(iteration) => write(target, &iteration.key, Value::Null).map(|_| true),
            TargetDescriptor::Transform(_) => {
                log::trace!("Transform descriptor has no destination for an absent value");
                Ok(false)
            }
        };
    };

    match descriptor {
        TargetDescriptor::Plain(target_path) => write_coerced(target, target_path, value),
        TargetDescriptor::Transform(transform) => {
            let Some(Transformed { key, value }) = transform.call(value) else {
                log::trace!("Transform produced no output");
                return Ok(false);
            };
            let target_path = TargetPath::parse(&key)?;
            write_coerced(target, &target_path, &value)
        }
        TargetDescriptor::Iteration(iteration) => write(target, &iteration.key, value.clone()).map(|_| true),
    }
}

/// Store `value` at `path`, fabricating missing containers
pub fn write(target: &mut Value, path: &Path, value: Value) -> Result<()> {
    resolve_mut(target, path)?.write(value)?;
    Ok(())
}

fn write_coerced(target: &mut Value, target_path: &TargetPath, value: &Value) -> Result<bool> {
    let coerced = target_path.coercion.apply(value);
    log::trace!(
        "Writing {} value at '{}' ({})",
        crate::path::value_kind(&coerced),
        target_path.path,
        target_path.coercion
    );
    write(target, &target_path.path, coerced)?;
    Ok(true)
}
