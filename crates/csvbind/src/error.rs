//! Error types for CSV ingestion and row mapping.

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::target::{FieldKind, InstantiationFailure};

/// Errors that can occur while reading CSV files or mapping rows.
#[derive(Debug, Error)]
pub enum CsvError {
    // === Precondition Errors ===
    /// A caller supplied an unusable argument (empty path, malformed descriptor).
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // === File System Errors ===
    /// CSV file missing or unreadable.
    #[error("could not open CSV file {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Traversal root is not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to list a directory during traversal.
    #[error("failed to read directory {path}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    // === CSV Parsing Errors ===
    /// The header row is missing or unusable.
    #[error("header row is missing in CSV file {path}")]
    MissingHeader {
        path: PathBuf,
        #[source]
        reason: HeaderProblem,
    },

    /// Tokenizer or I/O failure after the header row.
    #[error("could not parse CSV file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Mapping Errors ===
    /// A header has no field of the same name on the target type.
    #[error("could not find field {header} in type {type_name}")]
    FieldNotFound { header: String, type_name: String },

    /// The target type cannot be constructed.
    #[error("could not create new instance of type {type_name}")]
    Instantiation {
        type_name: String,
        #[source]
        source: InstantiationFailure,
    },

    /// A cell could not be parsed as the declared numeric type.
    #[error("could not parse value '{value}' of field {header} as {kind}")]
    Coercion {
        header: String,
        value: String,
        kind: FieldKind,
        #[source]
        source: ParseIntError,
    },
}

/// Why a header row was rejected.
#[derive(Debug, Error)]
pub enum HeaderProblem {
    #[error("file is empty")]
    Empty,
    #[error("header row has no column names")]
    Blank,
    #[error("duplicate column name '{0}'")]
    Duplicate(String),
    #[error("header row is not valid UTF-8")]
    NotUtf8(#[source] csv::Error),
}

/// Fieldless discriminant of [`CsvError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    FileNotFound,
    DirectoryNotFound,
    DirectoryRead,
    MissingHeader,
    Parse,
    FieldNotFound,
    Instantiation,
    Coercion,
}

impl CsvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::DirectoryNotFound { .. } => ErrorKind::DirectoryNotFound,
            Self::DirectoryRead { .. } => ErrorKind::DirectoryRead,
            Self::MissingHeader { .. } => ErrorKind::MissingHeader,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            Self::Instantiation { .. } => ErrorKind::Instantiation,
            Self::Coercion { .. } => ErrorKind::Coercion,
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::FileNotFound => "file not found",
            Self::DirectoryNotFound => "directory not found",
            Self::DirectoryRead => "directory read",
            Self::MissingHeader => "missing header",
            Self::Parse => "parse",
            Self::FieldNotFound => "field not found",
            Self::Instantiation => "instantiation",
            Self::Coercion => "coercion",
        };
        f.write_str(name)
    }
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_field_not_found_display() {
        let err = CsvError::FieldNotFound {
            header: "unknownField".to_string(),
            type_name: "ValueObject".to_string(),
        };
        insta::assert_snapshot!(err.to_string(), @"could not find field unknownField in type ValueObject");
    }

    #[test]
    fn test_missing_header_display() {
        let err = CsvError::MissingHeader {
            path: PathBuf::from("/data/empty.csv"),
            reason: HeaderProblem::Empty,
        };
        insta::assert_snapshot!(err.to_string(), @"header row is missing in CSV file /data/empty.csv");
        insta::assert_snapshot!(err.source().unwrap().to_string(), @"file is empty");
    }

    #[test]
    fn test_instantiation_display() {
        let err = CsvError::Instantiation {
            type_name: "Shape".to_string(),
            source: InstantiationFailure::NoConstructor,
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"could not create new instance of type Shape"
        );
    }

    #[test]
    fn test_coercion_keeps_parse_error_as_source() {
        let source = "".parse::<i32>().unwrap_err();
        let err = CsvError::Coercion {
            header: "integerField".to_string(),
            value: String::new(),
            kind: FieldKind::Integer,
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Coercion);
        let inner = err.source().expect("coercion carries a cause");
        assert!(inner.downcast_ref::<ParseIntError>().is_some());
        insta::assert_snapshot!(
            err.to_string(),
            @"could not parse value '' of field integerField as integer"
        );
    }

    #[test]
    fn test_messages_do_not_repeat_cause() {
        let err = CsvError::FileNotFound {
            path: PathBuf::from("/data/x.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "could not open CSV file /data/x.csv");
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::FieldNotFound.to_string(), "field not found");
        assert_eq!(
            CsvError::invalid_argument("CSV input file is empty").kind(),
            ErrorKind::InvalidArgument
        );
    }
}
