//! Enumeration views and visitors over composites and streams

use std::thread;

use nebula_reflect::{Data, MapData, ReflectError, Shape, StreamData, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn ordered_map() -> Data {
    let mut map = MapData::new(Shape::TEXT, Shape::INT64);
    for (k, v) in [("zeta", 1_i64), ("alpha", 2), ("mid", 3)] {
        map.insert(Data::from(k), Data::from(v), "test").unwrap();
    }
    Data::Map(map)
}

#[test]
fn test_views_agree_on_order() {
    let data = ordered_map();
    let value = Value::wrap(&data);

    let keys: Vec<_> = value
        .map()
        .unwrap()
        .keys()
        .map(|k| k.text().unwrap())
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

    let alist: Vec<_> = value
        .alist()
        .unwrap()
        .into_iter()
        .map(|(k, v)| (k.text().unwrap(), v.int64().unwrap()))
        .collect();
    assert_eq!(
        alist,
        vec![("zeta".to_owned(), 1), ("alpha".to_owned(), 2), ("mid".to_owned(), 3)]
    );

    let plist: Vec<_> = value
        .plist()
        .unwrap()
        .into_iter()
        .map(|v| v.text().unwrap())
        .collect();
    assert_eq!(plist, vec!["zeta", "1", "alpha", "2", "mid", "3"]);
}

#[rstest]
#[case(Data::Bool(true))]
#[case(Data::Int16(3))]
#[case(Data::Uint(4))]
#[case(Data::Float32(0.5))]
fn test_each_do_on_scalars_visits_once(#[case] data: Data) {
    let mut visits = Vec::new();
    Value::wrap(&data)
        .each_do(|k, v| {
            visits.push((k.is_none(), v.into_data()));
            Ok::<_, ReflectError>(())
        })
        .unwrap();
    assert_eq!(visits, vec![(true, data.clone())]);
}

#[test]
fn test_each_do_counts_entries() {
    let data = Data::from(serde_json::json!({"a": 1, "b": [1, 2], "c": null}));
    let mut keys = Vec::new();
    Value::wrap(&data)
        .each_do(|k, _| {
            if let Some(k) = k {
                keys.push(k.text()?);
            }
            Ok::<_, ReflectError>(())
        })
        .unwrap();
    assert_eq!(keys.len(), 3);
}

#[test]
fn test_each_do_stream_from_producer_thread() {
    let (tx, rx) = async_channel::bounded(2);
    let producer = thread::spawn(move || {
        for i in 0..5_i64 {
            tx.send_blocking(Data::from(i * i)).unwrap();
        }
    });

    let data = Data::Stream(StreamData::new(Shape::INT64, rx));
    let mut seen = Vec::new();
    Value::wrap(&data)
        .each_do(|k, v| {
            let idx = k.map(|k| k.int64()).transpose()?;
            seen.push((idx, v.int64()?));
            Ok::<_, ReflectError>(())
        })
        .unwrap();
    producer.join().unwrap();

    assert_eq!(
        seen,
        vec![(Some(0), 0), (Some(1), 1), (Some(2), 4), (Some(3), 9), (Some(4), 16)]
    );
}

#[test]
fn test_slice_mut_rewrites_every_element() {
    let mut data = Data::list(["a", "b"]);
    {
        let mut value = Value::wrap_mut(&mut data);
        for mut elem in value.slice_mut().unwrap() {
            let upper = elem.text().unwrap().to_uppercase();
            elem.set(upper).unwrap();
        }
    }
    assert_eq!(data.to_string(), "[A B]");
}
