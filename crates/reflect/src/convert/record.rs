//! Record destinations: binding source keys to fields

use super::{Converter, OP};
use crate::data::{Data, RecordData};
use crate::error::Result;
use crate::stringify;
use crate::value::enumerate::pairs;

/// Bind every source pair to a record field and convert it in place
///
/// If any source key carries an uppercase character, name-bound fields
/// match by exact name for the whole record; otherwise they match
/// case-insensitively. Keys naming a passthrough field and keys that match
/// nothing are skipped. The first key bound to a field wins.
pub(super) fn bind(conv: &Converter, src: &Data, dst: &mut RecordData, depth: usize) -> Result<()> {
    let pairs = pairs(src, OP)?;
    let keys = pairs
        .iter()
        .map(|(key, _)| stringify::text(key))
        .collect::<Result<Vec<_>>>()?;

    let match_case = keys.iter().any(|key| key.chars().any(char::is_uppercase));
    let shape = dst.shape().clone();
    tracing::debug!(record = shape.name(), match_case, keys = keys.len(), "binding record");

    let table = shape.bindings();
    let mut bound = vec![false; shape.fields().len()];
    for (key, (_, value)) in keys.iter().zip(&pairs) {
        if table.is_passthrough(key) {
            tracing::trace!(record = shape.name(), key = %key, "skipping passthrough key");
            continue;
        }
        let Some(idx) = table.lookup(key, match_case) else {
            tracing::trace!(record = shape.name(), key = %key, "no field for key");
            continue;
        };
        if bound[idx] {
            tracing::trace!(record = shape.name(), key = %key, "field already bound");
            continue;
        }
        conv.convert_at(value, &mut dst.fields_mut()[idx], depth + 1)?;
        bound[idx] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::shape::{FieldShape, RecordShape, Shape};
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn config() -> Arc<RecordShape> {
        RecordShape::builder("Config")
            .field(FieldShape::new("A", Shape::INT64).tag("a"))
            .field(FieldShape::new("B", Shape::INT64).tag("_"))
            .field(FieldShape::new("Name", Shape::TEXT))
            .build()
    }

    fn convert(src: Data) -> Data {
        Value::new(src).conv_as(&Shape::Record(config())).unwrap()
    }

    #[test]
    fn test_custom_key_and_passthrough() {
        let out = convert(Data::object([
            ("a", Data::from(1_i64)),
            ("B", Data::from(7_i64)),
            ("name", Data::from("n")),
        ]));
        // "B" has an uppercase letter, so "name" no longer matches "Name"
        assert_eq!(out.to_string(), "Config{A:1 B:0 Name:}");
    }

    #[test]
    fn test_lowercase_keys_match_case_insensitively() {
        let out = convert(Data::object([("a", Data::from(2_i64)), ("name", Data::from("n"))]));
        assert_eq!(out.to_string(), "Config{A:2 B:0 Name:n}");
    }

    #[test]
    fn test_exact_names_with_uppercase_keys() {
        let out = convert(Data::object([("Name", "exact"), ("A", "ignored")]));
        assert_eq!(out.to_string(), "Config{A:0 B:0 Name:exact}");
    }

    #[test]
    fn test_first_key_wins() {
        // "1" and 1 both stringify to the same key
        let shape = RecordShape::builder("Pair")
            .field(FieldShape::new("Key", Shape::TEXT).tag("1"))
            .build();
        let src = Data::Map(
            crate::data::MapData::from_entries(
                Shape::Any,
                Shape::TEXT,
                [(Data::from("1"), "first"), (Data::Int(1), "second")],
            )
            .unwrap(),
        );
        let out = Value::new(src).conv_as(&Shape::Record(shape)).unwrap();
        assert_eq!(out.to_string(), "Pair{Key:first}");
    }

    #[test]
    fn test_record_from_record() {
        let src = RecordData::new(config()).with("Name", "copied").unwrap().with("A", 3_i64).unwrap();
        let out = convert(Data::Record(src));
        // record field names are keys; "A" is custom-keyed as "a" so it is not bound
        assert_eq!(out.to_string(), "Config{A:0 B:0 Name:copied}");
    }

    #[test]
    fn test_unenumerable_source() {
        let err = Value::new(5_i64)
            .conv_as(&Shape::Record(config()))
            .unwrap_err();
        assert_eq!(err.code(), "REFLECT_UNSUPPORTED_KIND");
    }

    #[test]
    fn test_field_conversion_error_propagates() {
        let err = Value::new(Data::object([("a", "not a number")]))
            .conv_as(&Shape::Record(config()))
            .unwrap_err();
        assert_eq!(err.code(), "REFLECT_TYPE_UNEQUAL");
    }
}
