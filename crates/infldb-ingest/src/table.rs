//! Header-keyed CSV parsing.

use std::collections::BTreeMap;

use csv::ReaderBuilder;

use crate::error::IngestError;

/// One data row keyed by (trimmed) header name. Cell values are verbatim.
pub type CsvRow = BTreeMap<String, String>;

/// A parsed CSV body: the header row and every data row after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Parses `text` with its first line as the header row.
    ///
    /// Rows may be shorter or longer than the header; missing cells are
    /// simply absent from the row map and extra cells are ignored. Header
    /// names lose a leading BOM and surrounding whitespace; cell values are
    /// kept as written and trimmed per field by [`crate::schema`].
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Csv`] on malformed CSV (for example invalid
    /// UTF-8), labelled with `source_label`.
    pub fn parse(text: &str, source_label: &str) -> Result<Self, IngestError> {
        let csv_err = |source| IngestError::Csv {
            source_label: source_label.to_owned(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let row: CsvRow = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
