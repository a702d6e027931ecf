//! Reading source values
//!
//! The getter distinguishes two kinds of "nothing": a path that cannot be
//! addressed at all (`get` returns `None`) and an addressable location that
//! holds no value (`Got::value` is `None`).

use crate::path::resolve;
use crate::spec::SourcePath;
use crate::Result;
use serde_json::Value;

/// Result of reading a source path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Got<'a> {
    /// The source expression carried the iteration marker
    pub need_iteration: bool,
    /// Value found at the location
    pub value: Option<&'a Value>,
}

/// Read `source` at `key`
pub fn get<'a>(source: &'a Value, key: &SourcePath) -> Option<Got<'a>> {
    let location = resolve(source, key.path())?;
    Some(Got {
        need_iteration: key.iterate(),
        value: location.value(),
    })
}

/// Parse `expression` as a source path and read it
pub fn get_str<'a>(source: &'a Value, expression: &str) -> Result<Option<Got<'a>>> {
    let key = SourcePath::parse(expression)?;
    Ok(get(source, &key))
}
