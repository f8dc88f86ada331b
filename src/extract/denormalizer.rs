//! Denormalization - flatten a one-to-many hierarchy into repeated rows
//!
//! A `Denormalizer` applies a [`TableSpec`] to a value tree: one record
//! per (outer element, inner element) pair, outer fields repeated on every
//! row of their fan-out. Outer elements whose fan-out collection is absent
//! or empty contribute no records at all - there are no null-padded rows.

use crate::extract::scalars::{ensure_tree_root, resolve_nodes};
use crate::extract::table::{Column, Scope, TableSpec};
use crate::extract::types::{ExtractError, JsonType, Record};
use serde_json::{Map, Value};

/// Applies one table spec to value trees
pub struct Denormalizer {
    spec: TableSpec,
}

impl Denormalizer {
    pub fn new(spec: TableSpec) -> Self {
        Denormalizer { spec }
    }

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// Build the flat records for one tree.
    ///
    /// The root must be an object or array; everything below resolves
    /// leniently. Records come out in outer-then-inner order, matching
    /// the tree.
    pub fn denormalize(&self, tree: &Value) -> Result<Vec<Record>, ExtractError> {
        ensure_tree_root(tree)?;

        let mut root_nodes = Vec::new();
        resolve_nodes(tree, self.spec.root.segments(), &mut root_nodes);

        let mut records = Vec::new();
        for node in root_nodes {
            match node {
                // Root path landed on the collection itself
                Value::Array(items) => {
                    for item in items {
                        self.denormalize_outer(item, &mut records);
                    }
                }
                // Root path already fanned out to the elements
                Value::Object(_) => self.denormalize_outer(node, &mut records),
                _ => {}
            }
        }

        Ok(records)
    }

    fn denormalize_outer(&self, outer: &Value, records: &mut Vec<Record>) {
        let Value::Object(outer_map) = outer else {
            return;
        };

        // A missing or non-array fan-out key is an empty collection
        let Some(Value::Array(inner_items)) = outer_map.get(&self.spec.fanout) else {
            return;
        };

        for inner in inner_items {
            if let Some(record) = self.build_record(outer, inner) {
                records.push(record);
            }
        }
    }

    fn build_record(&self, outer: &Value, inner: &Value) -> Option<Record> {
        let mut columns = Map::new();

        for column in &self.spec.columns {
            let base = match column.scope {
                Scope::Outer => outer,
                Scope::Inner => inner,
            };

            match resolve_column(base, column) {
                Some(value) => {
                    columns.insert(column.name.clone(), value);
                }
                None if column.required => return None,
                None => {
                    columns.insert(column.name.clone(), Value::Null);
                }
            }
        }

        Some(Record::new(columns))
    }
}

/// Resolve one column path against its scope element; the first scalar
/// wins if the path fans out.
fn resolve_column(base: &Value, column: &Column) -> Option<Value> {
    let mut nodes = Vec::new();
    resolve_nodes(base, column.path.segments(), &mut nodes);

    nodes
        .into_iter()
        .find(|node| JsonType::from_value(node).is_scalar())
        .cloned()
}
