//! Enumeration: `map`, `slice`, `alist`, `plist` and `each_do`
//!
//! Views are snapshots of the composite at call time. Keys are the original
//! map keys, `Int` indexes for arrays and sequences, or `Text` field names for
//! records; elements are handles into the composite itself.

use std::borrow::Cow;

use indexmap::IndexMap;

use super::Value;
use crate::data::{Data, StreamData};
use crate::error::{ReflectError, Result};
use crate::kind::Kind;

fn index_key(idx: usize) -> Data {
    Data::Int(isize::try_from(idx).unwrap_or(isize::MAX))
}

fn key_value(key: Cow<'_, Data>) -> Value<'_> {
    match key {
        Cow::Borrowed(key) => Value::wrap(key),
        Cow::Owned(key) => Value::new(key),
    }
}

fn composite<'d>(data: &'d Data, op: &'static str) -> Result<&'d Data> {
    match data.resolve() {
        Data::Nil => Err(ReflectError::unsupported(op, Kind::Invalid)),
        nil if nil.is_nil() => Err(ReflectError::nil(op)),
        other => Ok(other),
    }
}

fn composite_mut<'d>(data: &'d mut Data, op: &'static str) -> Result<&'d mut Data> {
    let data = data.resolve_mut();
    if matches!(data, Data::Nil) {
        return Err(ReflectError::unsupported(op, Kind::Invalid));
    }
    if data.is_nil() {
        return Err(ReflectError::nil(op));
    }
    Ok(data)
}

/// Key/element pairs of a map, array, sequence or record
pub(crate) fn pairs<'d>(data: &'d Data, op: &'static str) -> Result<Vec<(Cow<'d, Data>, &'d Data)>> {
    Ok(match composite(data, op)? {
        Data::Map(map) => map.iter().map(|(k, v)| (Cow::Borrowed(k), v)).collect(),
        Data::Array(array) => indexed(array.items()),
        Data::Seq(seq) => indexed(seq.items()),
        Data::Record(record) => record
            .iter()
            .map(|(name, v)| (Cow::Owned(Data::from(name)), v))
            .collect(),
        other => return Err(ReflectError::unsupported(op, other.kind())),
    })
}

fn indexed(items: &[Data]) -> Vec<(Cow<'_, Data>, &Data)> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| (Cow::Owned(index_key(idx)), item))
        .collect()
}

fn pairs_mut<'d>(
    data: &'d mut Data,
    op: &'static str,
) -> Result<Vec<(Cow<'d, Data>, &'d mut Data)>> {
    Ok(match composite_mut(data, op)? {
        Data::Map(map) => map.iter_mut().map(|(k, v)| (Cow::Borrowed(k), v)).collect(),
        Data::Array(array) => indexed_mut(array.items_mut()),
        Data::Seq(seq) => indexed_mut(seq.items_mut()),
        Data::Record(record) => record
            .iter_mut()
            .map(|(name, v)| (Cow::Owned(Data::from(name)), v))
            .collect(),
        other => return Err(ReflectError::unsupported(op, other.kind())),
    })
}

fn indexed_mut(items: &mut [Data]) -> Vec<(Cow<'_, Data>, &mut Data)> {
    items
        .iter_mut()
        .enumerate()
        .map(|(idx, item)| (Cow::Owned(index_key(idx)), item))
        .collect()
}

/// Elements of an array, sequence or record; maps are rejected
pub(crate) fn elements<'d>(data: &'d Data, op: &'static str) -> Result<Vec<&'d Data>> {
    match composite(data, op)? {
        Data::Array(array) => Ok(array.items().iter().collect()),
        Data::Seq(seq) => Ok(seq.items().iter().collect()),
        Data::Record(record) => Ok(record.fields().iter().collect()),
        other => Err(ReflectError::unsupported(op, other.kind())),
    }
}

fn elements_mut<'d>(data: &'d mut Data, op: &'static str) -> Result<Vec<&'d mut Data>> {
    match composite_mut(data, op)? {
        Data::Array(array) => Ok(array.items_mut().iter_mut().collect()),
        Data::Seq(seq) => Ok(seq.items_mut().iter_mut().collect()),
        Data::Record(record) => Ok(record.fields_mut().iter_mut().collect()),
        other => Err(ReflectError::unsupported(op, other.kind())),
    }
}

/// Receive until the sender side is closed and the buffer drained
fn drain<E, F>(stream: &StreamData, op: &'static str, mut visit: F) -> Result<(), E>
where
    E: From<ReflectError>,
    F: FnMut(Value<'static>, Value<'static>) -> Result<(), E>,
{
    let rx = stream.receiver().ok_or(ReflectError::nil(op))?;
    tracing::debug!(op, elem = %stream.elem_shape().kind(), "draining stream");
    let mut received = 0;
    while let Ok(item) = rx.recv_blocking() {
        visit(Value::new(index_key(received)), Value::new(item))?;
        received += 1;
    }
    tracing::debug!(op, received, "stream closed");
    Ok(())
}

impl Value<'_> {
    /// Key to element association
    pub fn map(&self) -> Result<IndexMap<Value<'_>, Value<'_>>> {
        Ok(pairs(self.data(), "map")?
            .into_iter()
            .map(|(k, v)| (key_value(k), Value::wrap(v)))
            .collect())
    }

    /// Element values of an array, sequence or record
    pub fn slice(&self) -> Result<Vec<Value<'_>>> {
        Ok(elements(self.data(), "slice")?
            .into_iter()
            .map(Value::wrap)
            .collect())
    }

    /// Ordered key/element pairs
    pub fn alist(&self) -> Result<Vec<(Value<'_>, Value<'_>)>> {
        Ok(pairs(self.data(), "alist")?
            .into_iter()
            .map(|(k, v)| (key_value(k), Value::wrap(v)))
            .collect())
    }

    /// Flattened `key, element, key, element, ...`
    pub fn plist(&self) -> Result<Vec<Value<'_>>> {
        Ok(pairs(self.data(), "plist")?
            .into_iter()
            .flat_map(|(k, v)| [key_value(k), Value::wrap(v)])
            .collect())
    }

    /// Visit every key/element pair
    ///
    /// Scalars are visited once with no key. A stream blocks the calling
    /// thread and is visited element by element until it is closed and
    /// drained. The first visitor error aborts the walk and is returned.
    pub fn each_do<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        E: From<ReflectError>,
        F: FnMut(Option<Value<'_>>, Value<'_>) -> Result<(), E>,
    {
        const OP: &str = "each_do";
        let data = self.data().resolve();
        if data.kind().is_scalar() {
            return visit(None, Value::wrap(data));
        }
        if let Data::Stream(stream) = data {
            return drain(stream, OP, |k, v| visit(Some(k), v));
        }
        for (k, v) in pairs(data, OP)? {
            visit(Some(key_value(k)), Value::wrap(v))?;
        }
        Ok(())
    }

    /// Like [`slice`](Self::slice) with writable element handles
    pub fn slice_mut(&mut self) -> Result<Vec<Value<'_>>> {
        const OP: &str = "slice_mut";
        Ok(elements_mut(self.writable(OP)?, OP)?
            .into_iter()
            .map(Value::wrap_mut)
            .collect())
    }

    /// Like [`alist`](Self::alist) with writable element handles
    pub fn alist_mut(&mut self) -> Result<Vec<(Value<'_>, Value<'_>)>> {
        const OP: &str = "alist_mut";
        Ok(pairs_mut(self.writable(OP)?, OP)?
            .into_iter()
            .map(|(k, v)| (key_value(k), Value::wrap_mut(v)))
            .collect())
    }

    /// Like [`each_do`](Self::each_do) with writable element handles
    pub fn each_do_mut<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        E: From<ReflectError>,
        F: FnMut(Option<Value<'_>>, Value<'_>) -> Result<(), E>,
    {
        const OP: &str = "each_do_mut";
        let data = self.writable(OP)?.resolve_mut();
        if data.kind().is_scalar() {
            return visit(None, Value::wrap_mut(data));
        }
        if let Data::Stream(stream) = data {
            return drain(stream, OP, |k, v| visit(Some(k), v));
        }
        for (k, v) in pairs_mut(data, OP)? {
            visit(Some(key_value(k)), Value::wrap_mut(v))?;
        }
        Ok(())
    }
}
