//! Container destinations: bytes, maps, arrays and sequences

use super::{Converter, OP};
use crate::data::{ArrayData, Data, MapData, SeqData};
use crate::error::{ReflectError, Result};
use crate::kind::Kind;
use crate::shape::Shape;
use crate::value::enumerate::{elements, pairs};

/// Copy raw bytes, or collect a `Uint8` array or sequence
pub(super) fn bytes(src: &Data, dst: &mut Vec<u8>) -> Result<()> {
    let items = match src.resolve() {
        Data::Bytes(bytes) => {
            dst.clone_from(bytes);
            return Ok(());
        }
        Data::Array(array) if *array.elem_shape() == Shape::UINT8 => array.items(),
        Data::Seq(seq) if *seq.elem_shape() == Shape::UINT8 => seq.items(),
        Data::Nil => return Err(ReflectError::unsupported(OP, Kind::Invalid)),
        nil if nil.is_nil() => return Err(ReflectError::nil(OP)),
        other => return Err(ReflectError::unsupported(OP, other.kind())),
    };
    *dst = items
        .iter()
        .map(|item| match *item {
            Data::Uint8(b) => Ok(b),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        })
        .collect::<Result<_>>()?;
    Ok(())
}

/// Convert every source pair into the destination's key and value shapes
///
/// A nil destination is materialized first; an existing entry is converted
/// in place so a later duplicate key wins.
pub(super) fn map(conv: &Converter, src: &Data, dst: &mut MapData, depth: usize) -> Result<()> {
    let pairs = pairs(src, OP)?;
    let key_shape = dst.key_shape().clone();
    let value_shape = dst.value_shape().clone();
    let entries = dst.materialize();

    for (src_key, src_value) in pairs {
        let mut key = key_shape.zero();
        conv.convert_at(&src_key, &mut key, depth + 1)?;
        let slot = entries.entry(key).or_insert_with(|| value_shape.zero());
        conv.convert_at(src_value, slot, depth + 1)?;
    }
    Ok(())
}

/// Convert up to the array's capacity; surplus on either side is left alone
pub(super) fn array(conv: &Converter, src: &Data, dst: &mut ArrayData, depth: usize) -> Result<()> {
    let items = elements(src, OP)?;
    for (slot, item) in dst.items_mut().iter_mut().zip(items) {
        conv.convert_at(item, slot, depth + 1)?;
    }
    Ok(())
}

/// Resize to the source length and convert every element
pub(super) fn seq(conv: &Converter, src: &Data, dst: &mut SeqData, depth: usize) -> Result<()> {
    let items = elements(src, OP)?;
    dst.resize(items.len());
    for (slot, item) in dst.items_mut().iter_mut().zip(items) {
        conv.convert_at(item, slot, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bytes_from_uint8_sequence() {
        let src = Data::Seq(SeqData::from_items(Shape::UINT8, [104_u8, 105]).unwrap());
        let out = Value::new(src).conv_as(&Shape::BYTES).unwrap();
        assert_eq!(out, Data::from(&b"hi"[..]));

        let err = Value::new(Data::list([1_u8])).conv_as(&Shape::BYTES).unwrap_err();
        assert_eq!(err.code(), "REFLECT_UNSUPPORTED_KIND");
    }

    #[test]
    fn test_map_converts_keys_and_values() {
        let src = Data::Map(
            MapData::from_entries(Shape::INT8, Shape::INT8, [(1_i8, 10_i8), (2, 20)]).unwrap(),
        );
        let out = Value::new(src)
            .conv_as(&Shape::map(Shape::INT64, Shape::TEXT))
            .unwrap();
        assert_eq!(out.to_string(), "map[1:10 2:20]");
    }

    #[test]
    fn test_map_merges_into_existing_entries() {
        let mut dst = Data::Map(
            MapData::from_entries(Shape::TEXT, Shape::INT64, [("keep", 1_i64), ("a", 0)]).unwrap(),
        );
        Value::new(Data::object([("a", 5_i64)])).conv_into(&mut dst).unwrap();
        assert_eq!(dst.to_string(), "map[keep:1 a:5]");
    }

    #[test]
    fn test_map_from_record() {
        let shape = crate::shape::RecordShape::builder("P")
            .field(crate::shape::FieldShape::new("X", Shape::INT32))
            .build();
        let record = crate::data::RecordData::new(shape).with("X", 3_i32).unwrap();
        let out = Value::new(record)
            .conv_as(&Shape::map(Shape::TEXT, Shape::Any))
            .unwrap();
        assert_eq!(out.to_string(), "map[X:3]");
    }

    #[test]
    fn test_array_truncates_to_capacity() {
        let out = Value::new(Data::list([1_i64, 2, 3]))
            .conv_as(&Shape::array(Shape::INT64, 2))
            .unwrap();
        assert_eq!(out.to_string(), "[1 2]");

        let out = Value::new(Data::list([9_i64]))
            .conv_as(&Shape::array(Shape::INT64, 3))
            .unwrap();
        assert_eq!(out.to_string(), "[9 0 0]");
    }

    #[test]
    fn test_seq_resizes_to_source() {
        let mut dst = Data::Seq(SeqData::from_items(Shape::TEXT, ["x", "y", "z"]).unwrap());
        Value::new(Data::list([1_i64, 2])).conv_into(&mut dst).unwrap();
        assert_eq!(dst.to_string(), "[1 2]");
    }

    #[test]
    fn test_seq_rejects_map_source() {
        let err = Value::new(Data::object([("a", 1_i64)]))
            .conv_as(&Shape::seq(Shape::INT64))
            .unwrap_err();
        assert_eq!(err.code(), "REFLECT_UNSUPPORTED_KIND");
    }
}
