//! CSV access for the three table shapes the stages exchange: untyped tables
//! for merging, merged [`Record`]s, and flattened [`TreeRow`]s.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Writer, WriterBuilder};
use serde::de::DeserializeOwned;
use jidhr_protocol::{
    missing_columns, Record, TreeRow, OUTPUT_COLUMNS, REQUIRED_INPUT_COLUMNS,
    REQUIRED_OUTPUT_COLUMNS,
};

use crate::error::PipelineError;

/// Settings shared by every reader and writer of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub delimiter: u8,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableOptions {
    fn reader(&self, path: &Path) -> Result<Reader<File>, PipelineError> {
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PipelineError::NotFound { path: path.to_path_buf() },
            _ => PipelineError::io(path, err),
        })?;

        Ok(ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(file))
    }

    /// Headers are written explicitly so an empty table still gets one.
    fn writer(&self, path: &Path) -> Result<Writer<File>, PipelineError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| PipelineError::io(parent, err))?;
        }
        let file = File::create(path).map_err(|err| PipelineError::io(path, err))?;

        Ok(WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(file))
    }
}

/// An untyped table of string cells. Every row has exactly one cell per header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Reads a table; short rows are padded with empty cells, long rows cut.
    pub fn read(path: &Path, options: &TableOptions) -> Result<Self, PipelineError> {
        let mut reader = options.reader(path)?;
        let headers = reader
            .headers()
            .map_err(|err| PipelineError::csv(path, err))?;
        let mut table = Table::new(headers.iter());

        for record in reader.records() {
            let record = record.map_err(|err| PipelineError::csv(path, err))?;
            table.push_row(record.iter().map(String::from).collect());
        }
        Ok(table)
    }

    pub fn write(&self, path: &Path, options: &TableOptions) -> Result<(), PipelineError> {
        let mut writer = options.writer(path)?;
        writer
            .write_record(&self.headers)
            .map_err(|err| PipelineError::csv(path, err))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|err| PipelineError::csv(path, err))?;
        }
        writer.flush().map_err(|err| PipelineError::io(path, err))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Fails with every column of `columns` this table lacks.
    pub fn require(&self, table: &str, columns: &[&str]) -> Result<(), PipelineError> {
        let missing = missing_columns(columns, &self.headers);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::missing_columns(table, &missing))
        }
    }

    /// Index of `name`, appending it as an empty column if absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column(name) {
            return index;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Cell at `row`/`column`, empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Drops rows identical to an earlier row.
    pub fn dedup_rows(&mut self) {
        let keep: Vec<bool> = {
            let mut seen = HashSet::new();
            self.rows.iter().map(|row| seen.insert(row.as_slice())).collect()
        };
        let mut keep = keep.into_iter();
        self.rows.retain(|_| keep.next().unwrap_or(true));
    }
}

/// Reads a merged table, refusing it before any row is parsed if a required
/// column is missing.
pub fn read_records(path: &Path, options: &TableOptions) -> Result<Vec<Record>, PipelineError> {
    read_typed(path, &REQUIRED_INPUT_COLUMNS, options)
}

pub fn read_tree_rows(path: &Path, options: &TableOptions) -> Result<Vec<TreeRow>, PipelineError> {
    read_typed(path, &REQUIRED_OUTPUT_COLUMNS, options)
}

/// Validates the header, then deserializes every row. Rows are padded or cut
/// to the header width first, as [`Table::read`] does.
fn read_typed<T: DeserializeOwned>(
    path: &Path,
    required: &[&str],
    options: &TableOptions,
) -> Result<Vec<T>, PipelineError> {
    let mut reader = options.reader(path)?;
    let headers = reader
        .headers()
        .map_err(|err| PipelineError::csv(path, err))?
        .clone();

    let missing = missing_columns(required, headers.iter());
    if !missing.is_empty() {
        return Err(PipelineError::missing_columns(path.display().to_string(), &missing));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let mut record = record.map_err(|err| PipelineError::csv(path, err))?;
        record.truncate(headers.len());
        while record.len() < headers.len() {
            record.push_field("");
        }
        rows.push(
            record
                .deserialize(Some(&headers))
                .map_err(|err| PipelineError::csv(path, err))?,
        );
    }
    Ok(rows)
}

pub fn write_tree_rows(
    path: &Path,
    rows: &[TreeRow],
    options: &TableOptions,
) -> Result<(), PipelineError> {
    let mut writer = options.writer(path)?;
    writer
        .write_record(OUTPUT_COLUMNS)
        .map_err(|err| PipelineError::csv(path, err))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| PipelineError::csv(path, err))?;
    }
    writer.flush().map_err(|err| PipelineError::io(path, err))
}
