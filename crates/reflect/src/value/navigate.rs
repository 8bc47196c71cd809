//! Keyed navigation: `get`, `get_mut`, `put` and `set`

use super::Value;
use crate::convert::numeric;
use crate::data::Data;
use crate::error::{ReflectError, Result};
use crate::shape::Shape;

impl Value<'_> {
    /// Look up a map key, sequence index or record field name
    ///
    /// Returns `Ok(None)` when the key is absent, including out-of-bounds and
    /// negative indexes. `Ptr`/`Any` layers are followed; a nil layer fails
    /// with `CannotBeNil`.
    pub fn get(&self, key: impl Into<Data>) -> Result<Option<Value<'_>>> {
        let key = key.into();
        Ok(lookup(self.data(), &key)?.map(Value::wrap))
    }

    /// Like [`get`](Self::get), returning a writable child handle
    pub fn get_mut(&mut self, key: impl Into<Data>) -> Result<Option<Value<'_>>> {
        let key = key.into();
        let data = self.writable("get_mut")?;
        Ok(lookup_mut(data, &key)?.map(Value::wrap_mut))
    }

    /// Insert or overwrite the child at `key`
    ///
    /// Maps insert (materializing a nil map), sequences overwrite or grow,
    /// arrays overwrite within capacity and records overwrite an existing
    /// field. `val` is fitted to the slot's declared shape.
    pub fn put(&mut self, key: impl Into<Data>, val: impl Into<Data>) -> Result<()> {
        let data = self.writable("put")?;
        store(data, key.into(), val.into())
    }

    /// Replace the referenced payload
    ///
    /// One `Ptr`/`Any` layer is followed first. The replacement must have the
    /// same shape as the current payload; a mismatch reports the first pair
    /// of differing kinds, so `[]text` against `[]int64` names `Text` and
    /// `Int64` rather than `Seq` twice.
    pub fn set(&mut self, val: impl Into<Data>) -> Result<()> {
        const OP: &str = "set";
        let val = val.into();
        let slot = self.writable(OP)?;
        let target = match slot {
            Data::Ptr(ptr) => ptr.target_mut().ok_or(ReflectError::nil(OP))?,
            Data::Any(inner) => inner.as_deref_mut().ok_or(ReflectError::nil(OP))?,
            other => other,
        };
        if let Some((left, right)) = target.shape().mismatch(&val.shape()) {
            return Err(ReflectError::type_unequal(OP, left, right));
        }
        *target = val;
        Ok(())
    }
}

/// Normalize a key to the map's key shape; `None` means it cannot be present
fn map_key(shape: &Shape, key: &Data) -> Option<Data> {
    shape.fit(key.clone(), "get").ok()
}

/// Index from an integer key; `Ok(None)` for negative indexes
fn index(key: &Data, op: &'static str) -> Result<Option<usize>> {
    let key = key.resolve();
    let v = numeric::integer(key).ok_or(ReflectError::unsupported(op, key.kind()))?;
    Ok(usize::try_from(v).ok())
}

fn lookup<'d>(data: &'d Data, key: &Data) -> Result<Option<&'d Data>> {
    const OP: &str = "get";
    match data {
        Data::Map(map) => Ok(map_key(map.key_shape(), key).and_then(|k| map.get(&k))),
        Data::Array(array) => Ok(index(key, OP)?.and_then(|idx| array.items().get(idx))),
        Data::Seq(seq) => Ok(index(key, OP)?.and_then(|idx| seq.items().get(idx))),
        Data::Record(record) => match key.resolve() {
            Data::Text(name) => Ok(record.field(name)),
            other => Err(ReflectError::unsupported(OP, other.kind())),
        },
        Data::Any(Some(inner)) => lookup(inner, key),
        Data::Ptr(ptr) => lookup(ptr.target().ok_or(ReflectError::nil(OP))?, key),
        Data::Any(None) => Err(ReflectError::nil(OP)),
        other => Err(ReflectError::unsupported(OP, other.kind())),
    }
}

fn lookup_mut<'d>(data: &'d mut Data, key: &Data) -> Result<Option<&'d mut Data>> {
    const OP: &str = "get_mut";
    match data {
        Data::Map(map) => match map_key(map.key_shape(), key) {
            Some(k) => Ok(map.get_mut(&k)),
            None => Ok(None),
        },
        Data::Array(array) => match index(key, OP)? {
            Some(idx) => Ok(array.items_mut().get_mut(idx)),
            None => Ok(None),
        },
        Data::Seq(seq) => match index(key, OP)? {
            Some(idx) => Ok(seq.items_mut().get_mut(idx)),
            None => Ok(None),
        },
        Data::Record(record) => match key.resolve() {
            Data::Text(name) => Ok(record.field_mut(name)),
            other => Err(ReflectError::unsupported(OP, other.kind())),
        },
        Data::Any(Some(inner)) => lookup_mut(inner, key),
        Data::Ptr(ptr) => lookup_mut(ptr.target_mut().ok_or(ReflectError::nil(OP))?, key),
        Data::Any(None) => Err(ReflectError::nil(OP)),
        other => Err(ReflectError::unsupported(OP, other.kind())),
    }
}

fn store(data: &mut Data, key: Data, val: Data) -> Result<()> {
    const OP: &str = "put";
    match data {
        Data::Map(map) => map.insert(key, val, OP).map(drop),
        Data::Seq(seq) => {
            let idx = index(&key, OP)?
                .ok_or_else(|| ReflectError::not_exist(OP, format!("index {}", key.resolve())))?;
            let val = seq.elem_shape().fit(val, OP)?;
            seq.set_or_grow(idx, val);
            Ok(())
        }
        Data::Array(array) => {
            let len = array.len();
            let idx = index(&key, OP)?
                .ok_or_else(|| ReflectError::not_exist(OP, format!("index {}", key.resolve())))?;
            if idx >= len {
                return Err(ReflectError::out_of_range(OP, idx, len));
            }
            let val = array.elem_shape().fit(val, OP)?;
            array.items_mut()[idx] = val;
            Ok(())
        }
        Data::Record(record) => match key.resolve() {
            Data::Text(name) => record.put(name, val, OP),
            other => Err(ReflectError::unsupported(OP, other.kind())),
        },
        Data::Any(Some(inner)) => store(inner, key, val),
        Data::Ptr(ptr) => store(ptr.target_mut().ok_or(ReflectError::nil(OP))?, key, val),
        Data::Any(None) => Err(ReflectError::nil(OP)),
        other => Err(ReflectError::unsupported(OP, other.kind())),
    }
}
