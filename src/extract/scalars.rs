//! Scalar extraction - walk a field path through a value tree
//!
//! Resolution is strict at the root and lenient everywhere below it: a
//! root that is not an object or array fails the whole call, while an
//! absent key, an out-of-range index, or a segment applied to a node of
//! the wrong type just silences that one branch.

use crate::extract::path::{FieldPath, Segment};
use crate::extract::types::{ExtractError, JsonType, ValueKey};
use serde_json::Value;
use std::collections::HashSet;

/// Extract every scalar a path resolves to, in tree order.
///
/// When a key segment meets an array the extractor fans out, re-applying
/// the segment to every element, so one path can resolve to many scalars.
/// Branches where the path does not fully resolve to a scalar are dropped.
pub fn extract_scalars(tree: &Value, path: &FieldPath) -> Result<Vec<Value>, ExtractError> {
    ensure_tree_root(tree)?;

    let mut nodes = Vec::new();
    resolve_nodes(tree, path.segments(), &mut nodes);

    Ok(nodes
        .into_iter()
        .filter(|node| JsonType::from_value(node).is_scalar())
        .cloned()
        .collect())
}

/// Deduplicate a sequence of scalars by JSON value equality.
///
/// The result is a set; insertion order is not preserved. Applying this
/// to its own output is a no-op.
pub fn distinct_values<I>(values: I) -> HashSet<ValueKey>
where
    I: IntoIterator<Item = Value>,
{
    values.into_iter().map(ValueKey::new).collect()
}

/// Root inputs must be containers; scalars cannot be walked into.
pub(crate) fn ensure_tree_root(tree: &Value) -> Result<(), ExtractError> {
    match tree {
        Value::Object(_) | Value::Array(_) => Ok(()),
        other => Err(ExtractError::type_mismatch(other)),
    }
}

/// Collect every node the remaining segments resolve to.
///
/// `Key` over an array re-applies the same segment to each element (the
/// implicit fan-out); `Each` consumes its segment and fans out explicitly.
pub(crate) fn resolve_nodes<'a>(value: &'a Value, segments: &[Segment], out: &mut Vec<&'a Value>) {
    let Some((segment, rest)) = segments.split_first() else {
        out.push(value);
        return;
    };

    match segment {
        Segment::Key(key) => match value {
            Value::Object(map) => {
                if let Some(child) = map.get(key) {
                    resolve_nodes(child, rest, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    resolve_nodes(item, segments, out);
                }
            }
            _ => {}
        },
        Segment::Index(index) => {
            if let Value::Array(items) = value {
                if let Some(child) = items.get(*index) {
                    resolve_nodes(child, rest, out);
                }
            }
        }
        Segment::Each => {
            if let Value::Array(items) = value {
                for item in items {
                    resolve_nodes(item, rest, out);
                }
            }
        }
    }
}
