//! Value coercions applied before a write
//!
//! Conversions follow loose scripting-language semantics, since mapping
//! documents usually come from payloads where flags and counts arrive as
//! strings: booleans are recognised by a fixed set of truthy spellings and
//! numbers accept the usual decimal, exponent and radix-prefixed forms.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Lower-cased string forms that coerce to `true`
pub const TRUTHY_STRINGS: [&str; 5] = ["1", "true", "yes", "t", "y"];

/// Largest integer an `f64` holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Conversion requested for a destination path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Coercion {
    /// Write the value unchanged
    #[default]
    None,
    /// Truthy spelling check
    Boolean,
    /// Inverse of [`Coercion::Boolean`]
    NegatedBoolean,
    /// Numeric parse; unrepresentable results become `null`
    Number,
}

impl Coercion {
    /// Split a sigil-prefixed destination expression
    ///
    /// `!!path` keeps the boolean, `!path` negates it and `+path` asks for
    /// a number. Anything else is returned untouched.
    pub fn split_sigil(expression: &str) -> (Self, &str) {
        if let Some(rest) = expression.strip_prefix("!!") {
            (Self::Boolean, rest)
        } else if let Some(rest) = expression.strip_prefix('!') {
            (Self::NegatedBoolean, rest)
        } else if let Some(rest) = expression.strip_prefix('+') {
            (Self::Number, rest)
        } else {
            (Self::None, expression)
        }
    }

    /// Sigil prefix for this coercion
    pub fn sigil(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Boolean => "!!",
            Self::NegatedBoolean => "!",
            Self::Number => "+",
        }
    }

    /// Apply the coercion to `value`, producing an owned result
    pub fn apply(self, value: &Value) -> Value {
        match self {
            Self::None => value.clone(),
            Self::Boolean => Value::Bool(to_boolean(value)),
            Self::NegatedBoolean => Value::Bool(!to_boolean(value)),
            Self::Number => to_number(value),
        }
    }
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Boolean => write!(f, "boolean"),
            Self::NegatedBoolean => write!(f, "negated-boolean"),
            Self::Number => write!(f, "number"),
        }
    }
}

/// Whether the lower-cased string form of `value` is a truthy spelling
pub fn to_boolean(value: &Value) -> bool {
    let text = string_form(value).to_lowercase();
    TRUTHY_STRINGS.contains(&text.as_str())
}

/// Numeric conversion of `value`
///
/// Numbers pass through, booleans become 0/1, `null` becomes 0, strings
/// are trimmed and parsed (empty is 0). Sequences and objects go through
/// their string form. NaN and infinities are written as `null`.
pub fn to_number(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::Bool(b) => Value::from(u8::from(*b)),
        Value::Null => Value::from(0),
        Value::String(s) => number_value(parse_number(s)),
        Value::Array(_) | Value::Object(_) => number_value(parse_number(&string_form(value))),
    }
}

/// String form used by the boolean check
///
/// Sequences join their elements with commas (nulls become empty),
/// objects collapse to a fixed placeholder.
pub fn string_form(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => string_form(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64 Display prints integral floats without a trailing ".0"
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let well_formed = text.bytes().any(|b| b.is_ascii_digit())
        && text.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !well_formed {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Prefixed integer literal accumulated in `f64`, so values past `u64` stay finite
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
        .unwrap_or(f64::NAN)
}

fn number_value(n: f64) -> Value {
    if !n.is_finite() {
        return Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}
