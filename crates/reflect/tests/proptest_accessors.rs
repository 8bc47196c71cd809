//! Property-based tests for accessors and navigation
//!
//! Wrapping a native value and reading it back through the matching accessor
//! is the identity, and navigation agrees with direct inspection.

use nebula_reflect::{Data, MapData, SeqData, Shape, Value};
use proptest::prelude::*;

// ===== ACCESSOR IDENTITY =====

proptest! {
    #[test]
    fn int8_identity(x in any::<i8>()) {
        prop_assert_eq!(Value::new(x).int8().unwrap(), x);
    }

    #[test]
    fn int16_identity(x in any::<i16>()) {
        prop_assert_eq!(Value::new(x).int16().unwrap(), x);
    }

    #[test]
    fn int32_identity(x in any::<i32>()) {
        prop_assert_eq!(Value::new(x).int32().unwrap(), x);
    }

    #[test]
    fn int64_identity(x in any::<i64>()) {
        prop_assert_eq!(Value::new(x).int64().unwrap(), x);
    }

    #[test]
    fn int_identity(x in any::<isize>()) {
        prop_assert_eq!(Value::new(x).int().unwrap(), x);
    }

    #[test]
    fn uint_identities(a in any::<u8>(), b in any::<u16>(), c in any::<u32>(), d in any::<u64>(), e in any::<usize>()) {
        prop_assert_eq!(Value::new(a).uint8().unwrap(), a);
        prop_assert_eq!(Value::new(b).uint16().unwrap(), b);
        prop_assert_eq!(Value::new(c).uint32().unwrap(), c);
        prop_assert_eq!(Value::new(d).uint64().unwrap(), d);
        prop_assert_eq!(Value::new(e).uint().unwrap(), e);
    }

    #[test]
    fn float_identities(a in any::<f32>(), b in any::<f64>()) {
        let got = Value::new(a).float32().unwrap();
        prop_assert!(got == a || (got.is_nan() && a.is_nan()));
        let got = Value::new(b).float64().unwrap();
        prop_assert!(got == b || (got.is_nan() && b.is_nan()));
    }

    #[test]
    fn bool_and_text_identity(b in any::<bool>(), s in ".*") {
        prop_assert_eq!(Value::new(b).bool().unwrap(), b);
        prop_assert_eq!(Value::new(s.as_str()).text().unwrap(), s);
    }

    #[test]
    fn bytes_identity(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(Value::new(bytes.clone()).bytes().unwrap(), bytes);
    }

    #[test]
    fn widening_into_int64(x in any::<i16>()) {
        prop_assert_eq!(Value::new(x).int64().unwrap(), i64::from(x));
        let out = Value::new(x).conv_as(&Shape::INT64).unwrap();
        prop_assert_eq!(out, Data::Int64(i64::from(x)));
    }

    #[test]
    fn integer_text_round_trip(x in any::<i64>()) {
        prop_assert_eq!(Value::new(x).text().unwrap(), x.to_string());
    }
}

// ===== NAVIGATION =====

proptest! {
    #[test]
    fn sequence_get_matches_items(items in proptest::collection::vec(any::<i32>(), 0..16), idx in 0usize..20) {
        let data = Data::Seq(SeqData::from_items(Shape::INT32, items.clone()).unwrap());
        let value = Value::wrap(&data);
        let got = value.get(idx).unwrap().map(|v| v.int32().unwrap());
        prop_assert_eq!(got, items.get(idx).copied());
    }

    #[test]
    fn map_put_then_get(entries in proptest::collection::vec(("[a-z]{1,4}", any::<i64>()), 0..12)) {
        let mut data = Data::Map(MapData::nil(Shape::TEXT, Shape::INT64));
        let mut value = Value::wrap_mut(&mut data);
        for (k, v) in &entries {
            value.put(k.as_str(), *v).unwrap();
        }
        for (k, _) in &entries {
            let last = entries.iter().rev().find(|(key, _)| key == k).map(|(_, v)| *v);
            let got = value.get(k.as_str()).unwrap().map(|v| v.int64().unwrap());
            prop_assert_eq!(got, last);
        }
    }

    #[test]
    fn sequence_put_grows(len in 0usize..8, idx in 0usize..16, x in any::<u16>()) {
        let mut data = Data::Seq(SeqData::from_items(Shape::UINT16, vec![1_u16; len]).unwrap());
        let mut value = Value::wrap_mut(&mut data);
        value.put(idx, x).unwrap();
        prop_assert_eq!(value.get(idx).unwrap().unwrap().uint16().unwrap(), x);
        prop_assert_eq!(value.slice().unwrap().len(), len.max(idx + 1));
    }
}
