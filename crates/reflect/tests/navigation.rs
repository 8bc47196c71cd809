//! Navigation across nested composites decoded from JSON

use nebula_reflect::{Data, Kind, ReflectError, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn document() -> Data {
    Data::from(json!({
        "name": "nebula",
        "tags": ["a", "b"],
        "limits": {"cpu": 2, "memory": "512MiB"},
        "owner": null
    }))
}

#[test]
fn test_nested_get() {
    let data = document();
    let root = Value::wrap(&data);

    assert_eq!(root.get("name").unwrap().unwrap().text().unwrap(), "nebula");

    let tags = root.get("tags").unwrap().unwrap();
    assert_eq!(tags.resolved_kind(), Kind::Seq);
    assert_eq!(tags.get(1_i64).unwrap().unwrap().text().unwrap(), "b");
    assert!(tags.get(2_i64).unwrap().is_none());

    let limits = root.get("limits").unwrap().unwrap();
    assert_eq!(limits.get("cpu").unwrap().unwrap().int64().unwrap(), 2);
    assert!(limits.get("disk").unwrap().is_none());
}

#[test]
fn test_null_member_is_nil_layer() {
    let data = document();
    let doc_value = Value::wrap(&data);
    let owner = doc_value.get("owner").unwrap().unwrap();
    assert!(owner.is_nil());
    let err = owner.get("id").unwrap_err();
    assert!(matches!(err, ReflectError::CannotBeNil { op: "get" }));
}

#[test]
fn test_nested_put_through_get_mut() {
    let mut data = document();
    {
        let mut root = Value::wrap_mut(&mut data);
        let mut tags = root.get_mut("tags").unwrap().unwrap();
        tags.put(3_i64, "d").unwrap();
        root.put("version", 2_i64).unwrap();
    }

    let root = Value::wrap(&data);
    let tags = root.get("tags").unwrap().unwrap();
    // the gap is filled with the element zero, a nil `Any`
    assert_eq!(tags.to_string(), "[a b <nil> d]");
    assert_eq!(root.get("version").unwrap().unwrap().int64().unwrap(), 2);
}

#[test]
fn test_shared_handle_never_writes() {
    let data = document();
    let mut root = Value::wrap(&data);
    let err = root.put("name", "other").unwrap_err();
    assert_eq!(err.code(), "REFLECT_CANNOT_SET");
    assert!(root.get_mut("name").is_err());
    assert_eq!(Value::wrap(&data).get("name").unwrap().unwrap().text().unwrap(), "nebula");
}

#[test]
fn test_owned_copy_is_detached() {
    let data = document();
    let mut copy = Value::wrap(&data).to_owned_value();
    copy.put("name", "copy").unwrap();
    assert_eq!(copy.get("name").unwrap().unwrap().text().unwrap(), "copy");
    assert_eq!(Value::wrap(&data).get("name").unwrap().unwrap().text().unwrap(), "nebula");
}
