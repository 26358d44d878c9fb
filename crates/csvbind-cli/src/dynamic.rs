//! Records whose fields are declared on the command line.

use std::fmt;
use std::str::FromStr;

use csvbind::{FieldKind, TargetType};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Type name used for descriptors built from `--field` declarations.
pub const DYNAMIC_TYPE_NAME: &str = "Record";

/// One `NAME:KIND` field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FromStr for FieldSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (name, kind) = value
            .rsplit_once(':')
            .ok_or_else(|| format!("expected NAME:KIND, got '{value}'"))?;
        if name.is_empty() {
            return Err(format!("field name is empty in '{value}'"));
        }
        let kind = match kind.to_ascii_lowercase().as_str() {
            "text" | "string" => FieldKind::Text,
            "integer" | "int" => FieldKind::Integer,
            "long" => FieldKind::Long,
            "boolean" | "bool" => FieldKind::Boolean,
            "other" => FieldKind::Unsupported,
            other => {
                return Err(format!(
                    "unknown field kind '{other}' (expected text, integer, long, boolean or other)"
                ));
            }
        };
        Ok(Self {
            name: name.to_string(),
            kind,
        })
    }
}

/// A typed cell value of a [`DynamicRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynamicValue {
    Text(String),
    Integer(i32),
    Long(i64),
    Boolean(bool),
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => serializer.serialize_str(value),
            Self::Integer(value) => serializer.serialize_i32(*value),
            Self::Long(value) => serializer.serialize_i64(*value),
            Self::Boolean(value) => serializer.serialize_bool(*value),
        }
    }
}

/// Field values set while mapping one row, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicRecord {
    values: Vec<(String, DynamicValue)>,
}

impl DynamicRecord {
    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    fn set(&mut self, name: &str, value: DynamicValue) {
        self.values.push((name.to_string(), value));
    }
}

impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Builds a descriptor whose fields are the given declarations.
pub fn build_target(specs: &[FieldSpec]) -> TargetType<DynamicRecord> {
    specs
        .iter()
        .fold(TargetType::new(DYNAMIC_TYPE_NAME), |target, spec| {
            let name = spec.name.clone();
            match spec.kind {
                FieldKind::Text => target.text(spec.name.as_str(), move |r, v| {
                    r.set(&name, DynamicValue::Text(v));
                }),
                FieldKind::Integer => target.integer(spec.name.as_str(), move |r, v| {
                    r.set(&name, DynamicValue::Integer(v));
                }),
                FieldKind::Long => target.long(spec.name.as_str(), move |r, v| {
                    r.set(&name, DynamicValue::Long(v));
                }),
                FieldKind::Boolean => target.boolean(spec.name.as_str(), move |r, v| {
                    r.set(&name, DynamicValue::Boolean(v));
                }),
                FieldKind::Unsupported => target.unsupported(name, "other"),
            }
        })
}
