//! Row-to-record mapping.

use crate::error::{CsvError, Result};
use crate::row::CsvRow;
use crate::target::TargetType;

/// Maps one row onto a fresh instance of the target type.
///
/// The instance is constructed first, so a type without a constructor fails
/// with [`CsvError::Instantiation`] on every row. Each header is then bound to
/// the field of the same name, in header order; the first header without a
/// field aborts the row with [`CsvError::FieldNotFound`], and the first
/// malformed numeric cell with [`CsvError::Coercion`]. Fields of the target
/// type that have no column in the row keep their default value.
pub fn map_row<T>(row: &CsvRow, target: &TargetType<T>) -> Result<T> {
    let mut instance = target.instantiate()?;
    for (header, value) in row.iter() {
        let field = target
            .field(header)
            .ok_or_else(|| CsvError::FieldNotFound {
                header: header.to_string(),
                type_name: target.name().to_string(),
            })?;
        field.assign(&mut instance, value)?;
    }
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::target::InstantiationFailure;

    #[derive(Debug, Default, PartialEq)]
    struct ValueObject {
        string_field: Option<String>,
        integer_field: Option<i32>,
        long_field: Option<i64>,
        boolean_field: Option<bool>,
    }

    fn value_object() -> TargetType<ValueObject> {
        crate::target_type!(ValueObject {
            "stringField" => string_field: text,
            "integerField" => integer_field: integer,
            "longField" => long_field: long,
            "booleanField" => boolean_field: boolean,
        })
    }

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        CsvRow::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_maps_all_fields() {
        let mapped = map_row(
            &row(&[
                ("stringField", "Row1"),
                ("integerField", "1"),
                ("longField", "1"),
                ("booleanField", "true"),
            ]),
            &value_object(),
        )
        .unwrap();
        assert_eq!(
            mapped,
            ValueObject {
                string_field: Some("Row1".to_string()),
                integer_field: Some(1),
                long_field: Some(1),
                boolean_field: Some(true),
            }
        );
    }

    #[test]
    fn test_columns_missing_from_row_stay_default() {
        let mapped = map_row(
            &row(&[("stringField", "Row1"), ("longField", "1")]),
            &value_object(),
        )
        .unwrap();
        assert_eq!(mapped.string_field.as_deref(), Some("Row1"));
        assert_eq!(mapped.integer_field, None);
        assert_eq!(mapped.long_field, Some(1));
        assert_eq!(mapped.boolean_field, None);
    }

    #[test]
    fn test_boolean_cells() {
        let target = value_object();
        for (cell, expected) in [
            ("true", true),
            ("TRUE", true),
            ("True", true),
            ("", false),
            ("false", false),
            ("yes", false),
        ] {
            let mapped = map_row(&row(&[("booleanField", cell)]), &target).unwrap();
            assert_eq!(mapped.boolean_field, Some(expected), "cell {cell:?}");
        }
    }

    #[test]
    fn test_empty_numeric_cell_is_coercion_error() {
        let err = map_row(
            &row(&[("stringField", "Row1"), ("integerField", ""), ("longField", "1")]),
            &value_object(),
        )
        .unwrap_err();
        match err {
            CsvError::Coercion { header, value, .. } => {
                assert_eq!(header, "integerField");
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_header_is_field_not_found() {
        let err = map_row(
            &row(&[("stringField", "Row1"), ("wrongField", "x")]),
            &value_object(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
        assert_eq!(
            err.to_string(),
            "could not find field wrongField in type ValueObject"
        );
    }

    #[test]
    fn test_first_failing_header_wins() {
        // "integerField" is bad, but "unknown" comes first in header order.
        let err = map_row(
            &row(&[("unknown", "x"), ("integerField", "bad")]),
            &value_object(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);

        let err = map_row(
            &row(&[("integerField", "bad"), ("unknown", "x")]),
            &value_object(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
    }

    #[test]
    fn test_instantiation_checked_before_headers() {
        let target = TargetType::<ValueObject>::without_constructor("Interface")
            .text("stringField", |v, s| v.string_field = Some(s));
        for cells in [&[("stringField", "Row1")][..], &[("unknown", "x")][..]] {
            let err = map_row(&row(cells), &target).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Instantiation);
        }
    }

    #[test]
    fn test_factory_errors_are_wrapped() {
        let target = TargetType::<ValueObject>::with_factory("Flaky", || {
            Err(InstantiationFailure::Failed("not today".to_string()))
        });
        let err = map_row(&row(&[("stringField", "x")]), &target).unwrap_err();
        assert!(matches!(
            err,
            CsvError::Instantiation {
                source: InstantiationFailure::Failed(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_field_keeps_default() {
        #[derive(Debug, Default)]
        struct WithDate {
            name: String,
            born: Option<(u16, u8, u8)>,
        }
        let target = crate::target_type!(WithDate {
            "name" => name: text,
            "born" => born: unsupported,
        });
        let mapped = map_row(&row(&[("name", "Ada"), ("born", "1815-12-10")]), &target).unwrap();
        assert_eq!(mapped.name, "Ada");
        assert_eq!(mapped.born, None);
    }
}
