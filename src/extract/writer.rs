use crate::extract::types::Record;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes records as JSON Lines to any sink
///
/// One record per line, columns in spec order. The crate opens no files
/// itself; hand in whatever `Write` the output should land in.
pub struct RecordWriter<W: Write> {
    writer: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        RecordWriter { writer }
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let json = serde_json::to_string(&record.columns)
            .context("Failed to serialize record")?;
        writeln!(self.writer, "{}", json)
            .context("Failed to write record")?;
        Ok(())
    }

    pub fn write_records(&mut self, records: Vec<Record>) -> Result<()> {
        for record in &records {
            self.write_record(record)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_writer() {
        let mut buffer = Vec::new();
        let mut writer = RecordWriter::new(&mut buffer);

        let record = Record::new(
            serde_json::from_value(json!({"firstname": "Jane", "city": "Akron"})).unwrap(),
        );

        writer.write_records(vec![record]).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Jane"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_one_line_per_record() {
        let mut buffer = Vec::new();
        let mut writer = RecordWriter::new(&mut buffer);

        let record = Record::new(
            serde_json::from_value(json!({"city": "Akron"})).unwrap(),
        );

        writer.write_records(vec![record.clone(), record]).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 2);
    }
}
