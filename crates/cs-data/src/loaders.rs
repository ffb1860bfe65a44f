use std::fs;
use std::io::Read;
use std::path::Path;

use cs_types::{CsError, CsResult, DataError, Person, PreferenceRecord, Roster, RosterRow};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

/// Parsed preference table: header plus one record per data row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceTable {
    pub header: Vec<String>,
    pub records: Vec<PreferenceRecord>,
}

impl PreferenceTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loader for the comma-delimited roster and preference tables.
///
/// The first non-blank line is always the header. Every cell is trimmed,
/// rows may be ragged and blank rows are ignored. A table without data rows
/// parses to an empty table rather than an error.
#[derive(Debug, Clone)]
pub struct TableLoader {
    delimiter: u8,
}

impl TableLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load a roster from a file on disk
    pub fn load_roster_file<P: AsRef<Path>>(&self, file_path: P) -> CsResult<Roster> {
        let path = file_path.as_ref();
        tracing::info!("Loading roster from: {}", path.display());

        let file = open(path)?;
        let roster = self.parse_roster(file)?;

        tracing::info!("Loaded {} roster rows from: {}", roster.len(), path.display());
        Ok(roster)
    }

    /// Load a preference table from a file on disk
    pub fn load_preferences_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> CsResult<PreferenceTable> {
        let path = file_path.as_ref();
        tracing::info!("Loading preferences from: {}", path.display());

        let file = open(path)?;
        let table = self.parse_preferences(file)?;

        tracing::info!("Loaded {} preference rows from: {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a roster: first column is the person id, the rest is opaque.
    pub fn parse_roster<R: Read>(&self, reader: R) -> CsResult<Roster> {
        let (header, records) = self.read_table(reader)?;

        let mut rows = Vec::with_capacity(records.len());
        for (line, record) in records {
            let mut cells = record.iter();
            let id = cells.next().unwrap_or_default();
            if id.is_empty() {
                tracing::warn!("Skipping roster row at line {}: empty person id", line);
                continue;
            }
            rows.push(RosterRow {
                person: Person::from(id),
                cells: cells.map(str::to_string).collect(),
            });
        }

        Ok(Roster::new(header, rows))
    }

    /// Parse a preference table: first column is the person id, the remaining
    /// non-empty cells are the ranked partners, most preferred first.
    pub fn parse_preferences<R: Read>(&self, reader: R) -> CsResult<PreferenceTable> {
        let (header, records) = self.read_table(reader)?;

        let mut parsed = Vec::with_capacity(records.len());
        for (line, record) in records {
            let mut cells = record.iter();
            let id = cells.next().unwrap_or_default();
            if id.is_empty() {
                tracing::warn!("Skipping preference row at line {}: empty person id", line);
                continue;
            }
            let partners = cells
                .filter(|cell| !cell.is_empty())
                .map(Person::from)
                .collect();
            parsed.push(PreferenceRecord::new(id, partners));
        }

        Ok(PreferenceTable {
            header,
            records: parsed,
        })
    }

    /// Read the header and all non-blank data records, tagged with their
    /// 1-based line numbers. Cells are split on the delimiter only; quotes
    /// are ordinary characters.
    fn read_table<R: Read>(&self, reader: R) -> CsResult<(Vec<String>, TableRows)> {
        let rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut header: Option<Vec<String>> = None;
        let mut records = Vec::new();
        for result in rdr.into_records() {
            let record = result.map_err(|e| table_error("Failed to read record", e))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            if header.is_none() {
                tracing::debug!("Table header: {:?}", record);
                header = Some(record.iter().map(str::to_string).collect());
                continue;
            }
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            records.push((line, record));
        }

        Ok((header.unwrap_or_default(), records))
    }
}

type TableRows = Vec<(u64, StringRecord)>;

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn table_error(context: &str, err: csv::Error) -> CsError {
    let message = format!("{}: {}", context, err);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => CsError::Io(e),
        _ => DataError::ParseError { message }.into(),
    }
}

fn open(path: &Path) -> CsResult<fs::File> {
    fs::File::open(path).map_err(|e| {
        DataError::LoadingFailed {
            message: format!("Failed to open {}: {}", path.display(), e),
        }
        .into()
    })
}
