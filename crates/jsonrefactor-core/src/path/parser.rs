//! Path expression parser
//!
//! A path is one or more dot-separated segments. Each segment is a
//! property name optionally followed by an array marker: `name[3]` for an
//! explicit index, `name[]` for "one past the end".

use super::error::PathError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static SEGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn segment_regex() -> &'static Regex {
    SEGMENT_REGEX.get_or_init(|| {
        Regex::new(r"^([^\[\]]+)(?:\[(\d*)\])?$").expect("segment grammar is a valid regex")
    })
}

/// Array marker attached to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpec {
    /// `[]`: the sequence's current length
    Append,
    /// `[n]`: an explicit position
    At(usize),
}

/// A single parsed segment of a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Property name before the optional array marker
    pub name: String,
    /// Array marker, if present
    pub index: Option<IndexSpec>,
}

impl Segment {
    /// Whether the segment carries an array marker
    pub fn is_array(&self) -> bool {
        self.index.is_some()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            None => write!(f, "{}", self.name),
            Some(IndexSpec::Append) => write!(f, "{}[]", self.name),
            Some(IndexSpec::At(i)) => write!(f, "{}[{}]", self.name, i),
        }
    }
}

/// A parsed dotted path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a path expression
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::syntax("Empty path expression", 0, input));
        }

        let mut segments = Vec::new();
        let mut offset = 0;
        for token in input.split('.') {
            segments.push(parse_segment(input, token, offset)?);
            offset += token.len() + 1;
        }

        Ok(Self {
            raw: input.to_string(),
            segments,
        })
    }

    /// The parsed segments, never empty
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segment(input: &str, token: &str, offset: usize) -> Result<Segment, PathError> {
    let Some(captures) = segment_regex().captures(token) else {
        return Err(PathError::syntax(describe_invalid(token), offset, input));
    };

    let name = captures[1].to_string();
    let index = match captures.get(2) {
        None => None,
        Some(digits) if digits.as_str().is_empty() => Some(IndexSpec::Append),
        Some(digits) => {
            let index = digits.as_str().parse::<usize>().map_err(|_| {
                PathError::syntax("Array index out of range", offset + digits.start(), input)
            })?;
            Some(IndexSpec::At(index))
        }
    };

    Ok(Segment { name, index })
}

fn describe_invalid(token: &str) -> &'static str {
    if token.is_empty() {
        return "Empty segment";
    }
    if token.starts_with('[') {
        return "Segment is missing a property name";
    }

    let opens = token.matches('[').count();
    let closes = token.matches(']').count();
    if opens != closes {
        "Unbalanced bracket"
    } else if opens > 1 {
        "Only one array marker is allowed per segment"
    } else if !token.ends_with(']') {
        "Array marker must end the segment"
    } else {
        "Array index must be a non-negative integer"
    }
}
