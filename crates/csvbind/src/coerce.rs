//! Coercion of raw cell text into typed values.
//!
//! Numbers are parsed as base-10 signed integers with no trimming, so an
//! empty cell is a coercion error. Booleans never fail: only `"true"` in any
//! ASCII case is true.

use crate::error::{CsvError, Result};
use crate::target::FieldKind;

/// Parses a cell as a 32-bit signed integer.
pub fn parse_integer(header: &str, value: &str) -> Result<i32> {
    value
        .parse::<i32>()
        .map_err(|source| coercion_error(header, value, FieldKind::Integer, source))
}

/// Parses a cell as a 64-bit signed integer.
pub fn parse_long(header: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|source| coercion_error(header, value, FieldKind::Long, source))
}

pub fn parse_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn coercion_error(
    header: &str,
    value: &str,
    kind: FieldKind,
    source: std::num::ParseIntError,
) -> CsvError {
    CsvError::Coercion {
        header: header.to_string(),
        value: value.to_string(),
        kind,
        source,
    }
}
