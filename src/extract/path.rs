//! Field paths - how a scalar is addressed inside a nested value tree
//!
//! A path is an ordered list of segments walked from the root. The textual
//! notation uses `.` between keys, `[n]` for a fixed array index, and `[]`
//! to fan out across every element of an array:
//!
//! - `firstname` - one key
//! - `people[].addresses[].city` - two fan-out points
//! - `matrix[0][1]` - fixed indices
//!
//! Fan-out also happens implicitly when a key segment meets an array: the
//! segment is re-applied to every element. `[]` just makes the fan-out
//! visible in the path text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Pre-compiled patterns for the path notation
static STEP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^.\[\]]+)?((?:\[\d*\])*)$").unwrap()
});

static BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d*)\]").unwrap()
});

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Look up a key in an object
    Key(String),
    /// Pick a fixed element of an array
    Index(usize),
    /// Fan out across every element of an array
    Each,
}

/// An ordered sequence of segments addressing scalars under a root value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

/// Error raised when textual path notation does not parse
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathParseError {
    #[error("empty field path")]
    Empty,
    #[error("malformed path segment `{0}`")]
    MalformedSegment(String),
}

impl FieldPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        FieldPath { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parse the textual notation, e.g. `people[].addresses[2].city`
    pub fn parse(notation: &str) -> Result<Self, PathParseError> {
        notation.parse()
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        if notation.is_empty() {
            return Err(PathParseError::Empty);
        }

        let mut segments = Vec::new();

        for step in notation.split('.') {
            let captures = STEP_REGEX
                .captures(step)
                .ok_or_else(|| PathParseError::MalformedSegment(step.to_string()))?;

            let key = captures.get(1);
            let brackets = captures.get(2).map_or("", |m| m.as_str());

            if key.is_none() && brackets.is_empty() {
                return Err(PathParseError::MalformedSegment(step.to_string()));
            }

            if let Some(key) = key {
                segments.push(Segment::Key(key.as_str().to_string()));
            }

            for bracket in BRACKET_REGEX.captures_iter(brackets) {
                let digits = &bracket[1];
                if digits.is_empty() {
                    segments.push(Segment::Each);
                } else {
                    let index = digits
                        .parse()
                        .map_err(|_| PathParseError::MalformedSegment(step.to_string()))?;
                    segments.push(Segment::Index(index));
                }
            }
        }

        Ok(FieldPath { segments })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Each => write!(f, "[]")?,
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_key() {
        let path: FieldPath = "firstname".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[Segment::Key("firstname".to_string())]
        );
    }

    #[test]
    fn test_parse_fanout_path() {
        let path: FieldPath = "people[].addresses[].city".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("people".to_string()),
                Segment::Each,
                Segment::Key("addresses".to_string()),
                Segment::Each,
                Segment::Key("city".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_fixed_indices() {
        let path: FieldPath = "matrix[0][12]".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("matrix".to_string()),
                Segment::Index(0),
                Segment::Index(12),
            ]
        );
    }

    #[test]
    fn test_parse_leading_index() {
        // Root itself may be an array
        let path: FieldPath = "[2].name".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[Segment::Index(2), Segment::Key("name".to_string())]
        );
    }

    #[test]
    fn test_display_round_trip() {
        for notation in ["firstname", "people[].addresses[].city", "matrix[0][12]", "[]"] {
            let path: FieldPath = notation.parse().unwrap();
            assert_eq!(path.to_string(), notation);
        }
    }

    #[test]
    fn test_reject_empty_path() {
        assert_eq!("".parse::<FieldPath>(), Err(PathParseError::Empty));
    }

    #[test]
    fn test_reject_malformed_segments() {
        for notation in ["a..b", "a[x]", "a[", "a]b", "people[]."] {
            assert!(matches!(
                notation.parse::<FieldPath>(),
                Err(PathParseError::MalformedSegment(_))
            ));
        }
    }
}
