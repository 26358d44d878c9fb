//! Header-keyed CSV rows.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::coerce::{parse_boolean, parse_integer, parse_long};
use crate::error::{CsvError, HeaderProblem, Result};

/// Type name reported when a row accessor cannot find a header.
const ROW_TYPE_NAME: &str = "CsvRow";

/// Ordered, unique column names of one CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl CsvHeaders {
    /// Builds the header index, rejecting blank or duplicate header rows.
    pub fn new(columns: Vec<String>) -> std::result::Result<Self, HeaderProblem> {
        if columns.iter().all(String::is_empty) {
            return Err(HeaderProblem::Blank);
        }
        let mut positions = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if positions.insert(column.clone(), idx).is_some() {
                return Err(HeaderProblem::Duplicate(column.clone()));
            }
        }
        Ok(Self { columns, positions })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, header: &str) -> Option<usize> {
        self.positions.get(header).copied()
    }
}

/// One data line of a CSV file, keyed by header.
///
/// Every header of the file has a value, possibly the empty string. Typed
/// accessors parse the raw text on each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    headers: Arc<CsvHeaders>,
    values: Vec<String>,
}

impl CsvRow {
    /// Pairs `values` with `headers` positionally.
    ///
    /// Callers guarantee `values.len() == headers.len()`.
    pub(crate) fn new(headers: Arc<CsvHeaders>, values: Vec<String>) -> Self {
        debug_assert_eq!(headers.len(), values.len());
        Self { headers, values }
    }

    /// Builds a row from header/value pairs, in the given order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(header, value)| (header.into(), value.into()))
            .unzip();
        let headers = CsvHeaders::new(columns)
            .map_err(|problem| CsvError::invalid_argument(format!("invalid row headers: {problem}")))?;
        Ok(Self::new(Arc::new(headers), values))
    }

    /// Headers in file order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.columns.iter().map(String::as_str)
    }

    /// Header/value pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .columns
            .iter()
            .zip(&self.values)
            .map(|(header, value)| (header.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw cell text for `header`.
    pub fn get(&self, header: &str) -> Result<&str> {
        self.headers
            .position(header)
            .map(|idx| self.values[idx].as_str())
            .ok_or_else(|| CsvError::FieldNotFound {
                header: header.to_string(),
                type_name: ROW_TYPE_NAME.to_string(),
            })
    }

    pub fn get_integer(&self, header: &str) -> Result<i32> {
        parse_integer(header, self.get(header)?)
    }

    pub fn get_long(&self, header: &str) -> Result<i64> {
        parse_long(header, self.get(header)?)
    }

    pub fn get_boolean(&self, header: &str) -> Result<bool> {
        self.get(header).map(parse_boolean)
    }

    /// Copies the row into a map sorted by header.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect()
    }
}

impl Serialize for CsvRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (header, value) in self.iter() {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}
