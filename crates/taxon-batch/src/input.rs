//! Tabular batch input parsing.
//!
//! A batch is a delimited text file with a header row. The relevant column is
//! named `description` or `Description` (exact match on either spelling, not
//! general case-insensitivity); all other columns are carried but ignored.
//! Blank lines are skipped by the reader.

use std::collections::HashMap;
use std::io::Read;

use taxon_core::Result;

/// CSV template offered for download, mirroring the expected input shape.
pub const TEMPLATE_CSV: &str =
    "description\n\"Manufacturing of leather shoes\"\n\"IT consulting services\"\n";

/// One parsed input row with all of its named columns.
#[derive(Debug, Clone)]
pub struct BatchRecord {
    fields: HashMap<String, String>,
}

impl BatchRecord {
    /// Build a record from column name/value pairs.
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// The usable description for this row, if any.
    ///
    /// Checks the `description` column first, then `Description`; a value that
    /// is blank after trimming does not count.
    pub fn description(&self) -> Option<&str> {
        self.fields
            .get("description")
            .or_else(|| self.fields.get("Description"))
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Raw column value by exact header name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }
}

/// Parsed batch upload: an ordered sequence of records.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    records: Vec<BatchRecord>,
}

impl BatchInput {
    /// Parse delimited text with a header row from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let fields = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect();
            records.push(BatchRecord::new(fields));
        }

        Ok(Self { records })
    }

    /// Parse from an in-memory buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    /// All parsed records in input order.
    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
