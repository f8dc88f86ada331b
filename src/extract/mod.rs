//! Structured extraction - pull flat outputs out of nested value trees
//!
//! This module handles walking field paths through decoded JSON, fanning
//! out across arrays, and assembling the results as scalar columns or as
//! denormalized row records.
//!
//! Resolution is strict about the root of a call and forgiving below it:
//! branches that do not resolve simply drop out of the output.

pub mod denormalizer;
pub mod path;
pub mod scalars;
pub mod table;
pub mod types;
pub mod writer;

pub use denormalizer::Denormalizer;
pub use path::{FieldPath, PathParseError, Segment};
pub use scalars::{distinct_values, extract_scalars};
pub use table::{Column, Scope, TableSpec, TableSpecBuilder};
pub use types::{ExtractError, JsonType, Record, ValueKey};
pub use writer::RecordWriter;
