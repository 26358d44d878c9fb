//! Target type descriptors.
//!
//! A [`TargetType`] tells the mapper how to build one record: how to construct
//! an empty instance, and which named fields exist with which declared types.
//! Descriptors are usually generated with the [`target_type!`](crate::target_type)
//! macro, but can be assembled by hand with the builder methods.
//!
//! # Example
//!
//! ```
//! use csvbind::{FieldKind, TargetType};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! let target = TargetType::<Person>::new("Person")
//!     .text("name", |p, v| p.name = v)
//!     .integer("age", |p, v| p.age = Some(v));
//!
//! assert_eq!(target.field("age").map(|f| f.kind()), Some(FieldKind::Integer));
//! assert!(target.field("email").is_none());
//! ```

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::coerce::{parse_boolean, parse_integer, parse_long};
use crate::error::{CsvError, Result};

/// Declared type of a target field, selecting the coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Raw cell text, unchanged.
    Text,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// `"true"` (any case) or false.
    Boolean,
    /// No coercion rule; the field keeps its default value.
    Unsupported,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Boolean => "boolean",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Why a target instance could not be created.
#[derive(Debug, Error)]
pub enum InstantiationFailure {
    #[error("type has no zero-argument constructor")]
    NoConstructor,
    #[error("constructor failed: {0}")]
    Failed(String),
}

type Factory<T> = Box<dyn Fn() -> std::result::Result<T, InstantiationFailure> + Send + Sync>;

enum Setter<T> {
    Text(Box<dyn Fn(&mut T, String) + Send + Sync>),
    Integer(Box<dyn Fn(&mut T, i32) + Send + Sync>),
    Long(Box<dyn Fn(&mut T, i64) + Send + Sync>),
    Boolean(Box<dyn Fn(&mut T, bool) + Send + Sync>),
    Unsupported,
}

/// A named field of a target type together with its setter.
pub struct FieldBinding<T> {
    name: String,
    declared_type: String,
    setter: Setter<T>,
}

impl<T> FieldBinding<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type the field was declared with, for diagnostics.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn kind(&self) -> FieldKind {
        match self.setter {
            Setter::Text(_) => FieldKind::Text,
            Setter::Integer(_) => FieldKind::Integer,
            Setter::Long(_) => FieldKind::Long,
            Setter::Boolean(_) => FieldKind::Boolean,
            Setter::Unsupported => FieldKind::Unsupported,
        }
    }

    /// Coerces `value` to the field's kind and stores it on `target`.
    pub(crate) fn assign(&self, target: &mut T, value: &str) -> Result<()> {
        match &self.setter {
            Setter::Text(set) => set(target, value.to_string()),
            Setter::Integer(set) => set(target, parse_integer(&self.name, value)?),
            Setter::Long(set) => set(target, parse_long(&self.name, value)?),
            Setter::Boolean(set) => set(target, parse_boolean(value)),
            Setter::Unsupported => {}
        }
        Ok(())
    }
}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("declared_type", &self.declared_type)
            .finish()
    }
}

/// Describes how to build instances of `T` from CSV rows.
pub struct TargetType<T> {
    name: String,
    factory: Option<Factory<T>>,
    fields: Vec<FieldBinding<T>>,
}

impl<T: Default + 'static> TargetType<T> {
    /// Creates a descriptor that constructs instances with `T::default()`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: Some(Box::new(|| Ok(T::default()))),
            fields: Vec::new(),
        }
    }
}

impl<T> TargetType<T> {
    /// Creates a descriptor with a custom, possibly failing, constructor.
    pub fn with_factory<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<T, InstantiationFailure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Some(Box::new(factory)),
            fields: Vec::new(),
        }
    }

    /// Creates a descriptor for a type that cannot be constructed.
    ///
    /// Mapping any row against it fails with [`CsvError::Instantiation`].
    pub fn without_constructor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn text<F>(self, name: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut T, String) + Send + Sync + 'static,
    {
        self.push(name, "String", Setter::Text(Box::new(setter)))
    }

    #[must_use]
    pub fn integer<F>(self, name: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut T, i32) + Send + Sync + 'static,
    {
        self.push(name, "i32", Setter::Integer(Box::new(setter)))
    }

    #[must_use]
    pub fn long<F>(self, name: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut T, i64) + Send + Sync + 'static,
    {
        self.push(name, "i64", Setter::Long(Box::new(setter)))
    }

    #[must_use]
    pub fn boolean<F>(self, name: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut T, bool) + Send + Sync + 'static,
    {
        self.push(name, "bool", Setter::Boolean(Box::new(setter)))
    }

    /// Registers a field whose type has no coercion rule.
    ///
    /// A matching header is accepted, but the field keeps its default value.
    #[must_use]
    pub fn unsupported(self, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        self.push(name, declared_type, Setter::Unsupported)
    }

    fn push(
        mut self,
        name: impl Into<String>,
        declared_type: impl Into<String>,
        setter: Setter<T>,
    ) -> Self {
        self.fields.push(FieldBinding {
            name: name.into(),
            declared_type: declared_type.into(),
            setter,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in registration order.
    pub fn fields(&self) -> &[FieldBinding<T>] {
        &self.fields
    }

    /// Looks up a field by exact, case-sensitive name.
    pub fn field(&self, name: &str) -> Option<&FieldBinding<T>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_constructible(&self) -> bool {
        self.factory.is_some()
    }

    /// Checks that the descriptor is well formed.
    ///
    /// Rejects an empty type name, empty field names and duplicate field names.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CsvError::invalid_argument("CSV record type name is empty"));
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(CsvError::invalid_argument(format!(
                    "type {} declares a field with an empty name",
                    self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(CsvError::invalid_argument(format!(
                    "type {} declares field {} more than once",
                    self.name, field.name
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn instantiate(&self) -> Result<T> {
        let factory = self
            .factory
            .as_ref()
            .ok_or_else(|| CsvError::Instantiation {
                type_name: self.name.clone(),
                source: InstantiationFailure::NoConstructor,
            })?;
        factory().map_err(|source| CsvError::Instantiation {
            type_name: self.name.clone(),
            source,
        })
    }
}

impl<T> fmt::Debug for TargetType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetType")
            .field("name", &self.name)
            .field("constructible", &self.is_constructible())
            .field("fields", &self.fields)
            .finish()
    }
}

#[doc(hidden)]
pub fn field_type_name<T, F>(_field: impl Fn(&T) -> &F) -> &'static str {
    std::any::type_name::<F>()
}

/// Builds a [`TargetType`] for a struct implementing `Default`.
///
/// Each entry maps a CSV header to a struct field and names its kind:
/// `text`, `integer`, `long`, `boolean` or `unsupported`. Values are assigned
/// through `Into`, so `Option<_>` fields work as well as plain ones.
///
/// ```
/// use csvbind::target_type;
///
/// #[derive(Default)]
/// struct ValueObject {
///     string_field: Option<String>,
///     integer_field: Option<i32>,
///     long_field: i64,
///     boolean_field: Option<bool>,
/// }
///
/// let target = target_type!(ValueObject {
///     "stringField" => string_field: text,
///     "integerField" => integer_field: integer,
///     "longField" => long_field: long,
///     "booleanField" => boolean_field: boolean,
/// });
/// assert_eq!(target.name(), "ValueObject");
/// assert_eq!(target.fields().len(), 4);
/// ```
#[macro_export]
macro_rules! target_type {
    (@field $target:ident, $ty:path, $header:literal, $field:ident, unsupported) => {
        $target.unsupported(
            $header,
            $crate::target::field_type_name(|value: &$ty| &value.$field),
        )
    };
    (@field $target:ident, $ty:path, $header:literal, $field:ident, $kind:ident) => {
        $target.$kind($header, |value: &mut $ty, cell| {
            value.$field = ::core::convert::Into::into(cell)
        })
    };
    ($ty:path { $($header:literal => $field:ident : $kind:ident),* $(,)? }) => {{
        let target = $crate::TargetType::<$ty>::new(::core::stringify!($ty));
        $(
            let target = $crate::target_type!(@field target, $ty, $header, $field, $kind);
        )*
        target
    }};
}
