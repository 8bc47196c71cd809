//! Bridge from decoded JSON into payloads
//!
//! Arrays become sequences of `Any` and objects become text-keyed maps of
//! `Any`; nested `null` is a nil `Any` layer.

use serde_json::Value as JsonValue;

use super::Data;

impl From<JsonValue> for Data {
    fn from(value: JsonValue) -> Self {
        from_json(value)
    }
}

fn from_json(value: JsonValue) -> Data {
    match value {
        JsonValue::Null => Data::Nil,
        JsonValue::Bool(b) => Data::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Data::Int64(i)
            } else if let Some(u) = n.as_u64() {
                Data::Uint64(u)
            } else {
                Data::Float64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => Data::Text(s),
        JsonValue::Array(items) => Data::list(items.into_iter().map(from_json)),
        JsonValue::Object(entries) => {
            Data::object(entries.into_iter().map(|(k, v)| (k, from_json(v))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use crate::shape::Shape;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(Data::from(json!(null)), Data::Nil);
        assert_eq!(Data::from(json!(true)), Data::Bool(true));
        assert_eq!(Data::from(json!(-3)), Data::Int64(-3));
        assert_eq!(Data::from(json!(u64::MAX)), Data::Uint64(u64::MAX));
        assert_eq!(Data::from(json!(1.5)), Data::Float64(1.5));
        assert_eq!(Data::from(json!("x")), Data::from("x"));
    }

    #[test]
    fn test_containers() {
        let data = Data::from(json!({"a": [1, null], "b": null}));
        assert_eq!(data.shape(), Shape::map(Shape::TEXT, Shape::Any));

        let Data::Map(map) = &data else {
            panic!("expected map, got {data:?}");
        };
        let a = map.get(&Data::from("a")).unwrap();
        assert_eq!(a.kind(), Kind::Any);
        assert_eq!(a.resolve().shape(), Shape::seq(Shape::Any));
        assert_eq!(map.get(&Data::from("b")), Some(&Data::Any(None)));

        let Data::Seq(seq) = a.resolve() else {
            panic!("expected seq");
        };
        assert_eq!(seq.items().to_vec(), vec![Data::any(1_i64), Data::Any(None)]);
    }
}
