//! CSV file reading into rows or typed records.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use csv::ReaderBuilder;

use crate::error::{CsvError, HeaderProblem, Result};
use crate::mapper::map_row;
use crate::row::{CsvHeaders, CsvRow};
use crate::target::TargetType;

/// Options for reading a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter byte (default `,`).
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Reads a comma-separated file into header-keyed rows.
///
/// The first line is the header row. A file holding only a header row yields
/// an empty vector.
pub fn read_rows(path: &Path) -> Result<Vec<CsvRow>> {
    read_rows_with(path, &ReadOptions::default())
}

/// Reads a CSV file into header-keyed rows with explicit options.
pub fn read_rows_with(path: &Path, options: &ReadOptions) -> Result<Vec<CsvRow>> {
    ensure_path(path)?;
    read_with(path, options, Ok)
}

/// Reads a comma-separated file and maps every row onto `target`.
///
/// Stops at the first row that fails to map and returns that error.
pub fn read_rows_as_objects<T>(path: &Path, target: &TargetType<T>) -> Result<Vec<T>> {
    read_rows_as_objects_with(path, target, &ReadOptions::default())
}

/// Reads a CSV file with explicit options and maps every row onto `target`.
pub fn read_rows_as_objects_with<T>(
    path: &Path,
    target: &TargetType<T>,
    options: &ReadOptions,
) -> Result<Vec<T>> {
    ensure_path(path)?;
    target.validate()?;
    read_with(path, options, |row| map_row(&row, target))
}

fn ensure_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(CsvError::invalid_argument("CSV input file path is empty"));
    }
    Ok(())
}

/// Shared pipeline: open, read the header, convert each data row.
///
/// The reader owns the file handle and closes it when this function returns.
fn read_with<T, F>(path: &Path, options: &ReadOptions, mut convert: F) -> Result<Vec<T>>
where
    F: FnMut(CsvRow) -> Result<T>,
{
    let file = open_file(path)?;
    tracing::debug!(path = %path.display(), "Opened CSV file");

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(file);

    let headers = Arc::new(read_headers(&mut reader, path)?);

    let mut results = Vec::new();
    for record_result in reader.records() {
        let record = record_result.map_err(|source| CsvError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let values: Vec<String> = record.iter().map(str::to_string).collect();
        results.push(convert(CsvRow::new(Arc::clone(&headers), values))?);
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = results.len(),
        "Read CSV rows"
    );
    Ok(results)
}

/// Opens `path` for reading. Directories open fine on some platforms but can
/// never be read, so they are reported here as well.
fn open_file(path: &Path) -> Result<File> {
    let not_found = |source| CsvError::FileNotFound {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(not_found)?;
    let metadata = file.metadata().map_err(not_found)?;
    if metadata.is_dir() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::IsADirectory,
            "path is a directory",
        )));
    }
    Ok(file)
}

fn read_headers<R: io::Read>(reader: &mut csv::Reader<R>, path: &Path) -> Result<CsvHeaders> {
    let missing = |reason| CsvError::MissingHeader {
        path: path.to_path_buf(),
        reason,
    };

    let record = match reader.headers() {
        Ok(record) => record,
        Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
            return Err(missing(HeaderProblem::NotUtf8(e)));
        }
        Err(source) => {
            return Err(CsvError::Parse {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if record.is_empty() {
        return Err(missing(HeaderProblem::Empty));
    }

    let columns: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            // Skip BOM if present
            if idx == 0 {
                name.strip_prefix('\u{feff}').unwrap_or(name).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    CsvHeaders::new(columns).map_err(missing)
}
