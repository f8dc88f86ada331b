//! Table specs - what a denormalization pass should pull out
//!
//! A `TableSpec` names an outer collection, the repeating collection
//! inside each of its elements, and the columns of the flat table built
//! from the two scopes. Specs are built once and applied to any number
//! of trees by a [`Denormalizer`](crate::extract::Denormalizer).

use crate::extract::path::{FieldPath, PathParseError};

/// Which element a column is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The element carrying the repeating collection (e.g. a person)
    Outer,
    /// One element of the repeating collection (e.g. an address)
    Inner,
}

/// One output column of a denormalized table
#[derive(Debug, Clone)]
pub struct Column {
    /// Output column name
    pub name: String,

    /// Path to the value, relative to the column's scope element
    pub path: FieldPath,

    /// Scope the path is resolved against
    pub scope: Scope,

    /// Required columns drop the whole record when they do not resolve;
    /// nullable columns emit JSON null instead
    pub required: bool,
}

/// Specification of one denormalized table
#[derive(Debug, Clone)]
pub struct TableSpec {
    /// Path from the tree root to the outer collection
    pub root: FieldPath,

    /// Key of the repeating collection inside each outer element
    pub fanout: String,

    /// Output columns, in declaration order
    pub columns: Vec<Column>,
}

impl TableSpec {
    /// Start building a spec.
    ///
    /// `root` is the path to the outer collection in textual notation,
    /// `fanout` the key of the repeating collection under each outer
    /// element.
    ///
    /// # Example
    /// ```rust
    /// use quarry::extract::TableSpec;
    ///
    /// let spec = TableSpec::builder("people", "addresses")
    ///     .outer("firstname", "firstname")
    ///     .outer("lastname", "lastname")
    ///     .inner("city", "city")
    ///     .inner("state", "state")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(spec.columns.len(), 4);
    /// ```
    pub fn builder(root: &str, fanout: &str) -> TableSpecBuilder {
        TableSpecBuilder {
            root: root.to_string(),
            fanout: fanout.to_string(),
            columns: Vec::new(),
        }
    }
}

/// Fluent builder for [`TableSpec`]
///
/// Paths are given in textual notation and parsed at `build` time, which
/// reports the first malformed one.
#[derive(Debug, Clone)]
pub struct TableSpecBuilder {
    root: String,
    fanout: String,
    columns: Vec<(String, String, Scope, bool)>,
}

impl TableSpecBuilder {
    /// Add a required column read from the outer element
    pub fn outer(mut self, name: &str, path: &str) -> Self {
        self.columns
            .push((name.to_string(), path.to_string(), Scope::Outer, true));
        self
    }

    /// Add a required column read from each inner element
    pub fn inner(mut self, name: &str, path: &str) -> Self {
        self.columns
            .push((name.to_string(), path.to_string(), Scope::Inner, true));
        self
    }

    /// Add a nullable column read from the outer element
    pub fn outer_nullable(mut self, name: &str, path: &str) -> Self {
        self.columns
            .push((name.to_string(), path.to_string(), Scope::Outer, false));
        self
    }

    /// Add a nullable column read from each inner element
    pub fn inner_nullable(mut self, name: &str, path: &str) -> Self {
        self.columns
            .push((name.to_string(), path.to_string(), Scope::Inner, false));
        self
    }

    pub fn build(self) -> Result<TableSpec, PathParseError> {
        let root = self.root.parse()?;

        let mut columns = Vec::with_capacity(self.columns.len());
        for (name, path, scope, required) in self.columns {
            columns.push(Column {
                name,
                path: path.parse()?,
                scope,
                required,
            });
        }

        Ok(TableSpec {
            root,
            fanout: self.fanout,
            columns,
        })
    }
}
