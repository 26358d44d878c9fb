//! CSV ingestion into header-keyed rows or typed records.
//!
//! This crate reads delimited text files whose first line is a header row and
//! turns each data line into either a [`CsvRow`] or an instance of a
//! caller-described type, matching headers to field names.
//!
//! # Features
//!
//! - **Row reading**: [`read_rows`] yields header-keyed rows with typed accessors
//! - **Record mapping**: [`read_rows_as_objects`] fills a [`TargetType`] per row
//! - **Field bindings**: the [`target_type!`] macro generates descriptors from a struct
//! - **File discovery**: [`find_files`] lists files below a root directory
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use csvbind::{find_files, has_extension, read_rows_as_objects, target_type};
//!
//! #[derive(Debug, Default)]
//! struct Reading {
//!     station: String,
//!     value: Option<i64>,
//!     valid: bool,
//! }
//!
//! let target = target_type!(Reading {
//!     "station" => station: text,
//!     "value" => value: long,
//!     "valid" => valid: boolean,
//! });
//!
//! for path in find_files(Path::new("data"))? {
//!     if has_extension(&path, "csv") {
//!         let readings = read_rows_as_objects(&path, &target)?;
//!         println!("{}: {} readings", path.display(), readings.len());
//!     }
//! }
//! # Ok::<(), csvbind::CsvError>(())
//! ```

mod coerce;
mod discovery;
mod error;
mod ingest;
mod mapper;
mod row;
pub mod target;

// === Error Types ===
pub use error::{CsvError, ErrorKind, HeaderProblem, Result};

// === Rows ===
pub use row::{CsvHeaders, CsvRow};

// === Target Types ===
pub use target::{FieldBinding, FieldKind, InstantiationFailure, TargetType};

// === Mapping ===
pub use mapper::map_row;

// === CSV Reading ===
pub use ingest::{
    ReadOptions, read_rows, read_rows_as_objects, read_rows_as_objects_with, read_rows_with,
};

// === File Discovery ===
pub use discovery::{find_files, has_extension};
