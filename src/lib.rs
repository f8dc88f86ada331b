//! # Quarry - JSON Extraction Toolkit
//!
//! A library for quarrying flat outputs out of nested JSON: walk field
//! paths through a decoded value tree, fan out across arrays, and build
//! scalar columns, distinct value sets, or denormalized row records.
//!
//! ## Modules
//!
//! - **extract**: path resolution, scalar extraction, and denormalization
//! - **decode**: the decoding collaborator that turns JSON text into trees
//!
//! ## Quick Start
//!
//! ### Denormalizing one-to-many data
//!
//! ```rust
//! use quarry::extract::{Denormalizer, TableSpec};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let tree = json!({
//!     "people": [
//!         {
//!             "firstname": "Jane",
//!             "addresses": [
//!                 {"city": "Akron"},
//!                 {"city": "Lima"}
//!             ]
//!         },
//!         {"firstname": "Joe", "addresses": []}
//!     ]
//! });
//!
//! let spec = TableSpec::builder("people", "addresses")
//!     .outer("firstname", "firstname")
//!     .inner("city", "city")
//!     .build()?;
//!
//! let records = Denormalizer::new(spec).denormalize(&tree)?;
//!
//! // Jane appears once per address; Joe has none and contributes no rows
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].get("city").unwrap(), "Lima");
//! # Ok(())
//! # }
//! ```
//!
//! ### Extracting a scalar column
//!
//! ```rust
//! use quarry::extract::{distinct_values, extract_scalars, FieldPath};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let tree = json!({
//!     "people": [
//!         {"addresses": [{"city": "Akron"}, {"city": "Lima"}]},
//!         {"addresses": [{"city": "Akron"}]}
//!     ]
//! });
//!
//! let path: FieldPath = "people[].addresses[].city".parse()?;
//! let cities = extract_scalars(&tree, &path)?;
//! assert_eq!(cities, vec![json!("Akron"), json!("Lima"), json!("Akron")]);
//!
//! let distinct = distinct_values(cities);
//! assert_eq!(distinct.len(), 2);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub mod decode;
pub mod extract;

// Re-export commonly used types for convenience
pub use decode::{decode_bytes, decode_str, DecodeError};
pub use extract::{
    distinct_values, extract_scalars, Denormalizer, ExtractError, FieldPath, Record, RecordWriter,
    TableSpec,
};

/// Main entry point: denormalize a stream of JSON documents into records
///
/// Reads one JSON document per line, applies the spec to each, and hands
/// the resulting records to the writer.
pub fn extract_records<R: BufRead, W: Write>(
    reader: R,
    writer: &mut RecordWriter<W>,
    spec: TableSpec,
) -> Result<()> {
    let denormalizer = Denormalizer::new(spec);

    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        let tree = decode_str(&line).context("Failed to parse JSON")?;

        let records = denormalizer.denormalize(&tree)?;
        writer.write_records(records)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_extraction() {
        let input = concat!(
            r#"{"people": [{"firstname": "Jane", "addresses": [{"city": "Akron"}, {"city": "Lima"}]}]}"#,
            "\n",
            r#"{"people": [{"firstname": "Joe", "addresses": [{"city": "Dayton"}]}]}"#,
            "\n",
        );

        let spec = TableSpec::builder("people", "addresses")
            .outer("firstname", "firstname")
            .inner("city", "city")
            .build()
            .unwrap();

        let mut buffer = Vec::new();
        let mut writer = RecordWriter::new(&mut buffer);
        extract_records(Cursor::new(input), &mut writer, spec).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Akron"));
        assert!(lines[2].contains("Dayton"));
    }

    #[test]
    fn test_stream_extraction_rejects_malformed_lines() {
        let spec = TableSpec::builder("people", "addresses")
            .inner("city", "city")
            .build()
            .unwrap();

        let mut buffer = Vec::new();
        let mut writer = RecordWriter::new(&mut buffer);
        let result = extract_records(Cursor::new("{broken\n"), &mut writer, spec);

        assert!(result.is_err());
    }
}
