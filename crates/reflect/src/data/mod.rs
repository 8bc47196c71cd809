//! Raw payloads
//!
//! [`Data`] is a tagged union over every [`Kind`]. Containers carry the
//! shapes of their elements so zero values can be materialized when a
//! sequence grows or a map, pointer or record slot is first written.

mod from;
mod hash;
mod json;

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_channel::Receiver;
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use regex::Regex;
use url::Url;

use crate::complex::Complex;
use crate::error::{ReflectError, Result};
use crate::known::{ByteSize, MailAddress};
use crate::kind::Kind;
use crate::shape::{RecordShape, Shape};

// ============================================================================
// DATA
// ============================================================================

/// A dynamically typed payload
#[derive(Debug, Clone, Default)]
pub enum Data {
    /// Nothing stored; kind `Invalid`
    #[default]
    Nil,
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Complex64(Complex<f32>),
    Complex128(Complex<f64>),
    Text(String),
    Bytes(Vec<u8>),
    Map(MapData),
    Array(ArrayData),
    Seq(SeqData),
    Record(RecordData),
    Ptr(PtrData),
    /// Interface-like box; `None` is a nil layer
    Any(Option<Box<Data>>),
    Stream(StreamData),
    Duration(Duration),
    Timestamp(DateTime<FixedOffset>),
    IpAddr(IpAddr),
    /// `None` is the zero URL
    Url(Option<Url>),
    MailAddress(MailAddress),
    /// `None` is the zero regex
    Regex(Option<Regex>),
    ByteSize(ByteSize),
}

impl Data {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Nil => Kind::Invalid,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Int8(_) => Kind::Int8,
            Self::Int16(_) => Kind::Int16,
            Self::Int32(_) => Kind::Int32,
            Self::Int64(_) => Kind::Int64,
            Self::Uint(_) => Kind::Uint,
            Self::Uint8(_) => Kind::Uint8,
            Self::Uint16(_) => Kind::Uint16,
            Self::Uint32(_) => Kind::Uint32,
            Self::Uint64(_) => Kind::Uint64,
            Self::Float32(_) => Kind::Float32,
            Self::Float64(_) => Kind::Float64,
            Self::Complex64(_) => Kind::Complex64,
            Self::Complex128(_) => Kind::Complex128,
            Self::Text(_) => Kind::Text,
            Self::Bytes(_) => Kind::Bytes,
            Self::Map(_) => Kind::Map,
            Self::Array(_) => Kind::Array,
            Self::Seq(_) => Kind::Seq,
            Self::Record(_) => Kind::Record,
            Self::Ptr(_) => Kind::Ptr,
            Self::Any(_) => Kind::Any,
            Self::Stream(_) => Kind::Stream,
            Self::Duration(_) => Kind::Duration,
            Self::Timestamp(_) => Kind::Timestamp,
            Self::IpAddr(_) => Kind::IpAddr,
            Self::Url(_) => Kind::Url,
            Self::MailAddress(_) => Kind::MailAddress,
            Self::Regex(_) => Kind::Regex,
            Self::ByteSize(_) => Kind::ByteSize,
        }
    }

    /// The static shape this payload was built for
    pub fn shape(&self) -> Shape {
        match self {
            Self::Map(m) => Shape::map(m.key.clone(), m.value.clone()),
            Self::Array(a) => Shape::array(a.elem.clone(), a.items.len()),
            Self::Seq(s) => Shape::seq(s.elem.clone()),
            Self::Record(r) => Shape::Record(Arc::clone(&r.shape)),
            Self::Ptr(p) => Shape::ptr(p.pointee.clone()),
            Self::Any(_) => Shape::Any,
            Self::Stream(s) => Shape::stream(s.elem.clone()),
            other => Shape::Scalar(other.kind()),
        }
    }

    /// Check for a nil payload or a nil indirection layer
    pub fn is_nil(&self) -> bool {
        match self {
            Self::Nil | Self::Any(None) => true,
            Self::Ptr(p) => p.target.is_none(),
            _ => false,
        }
    }

    /// Follow `Ptr`/`Any` layers to the first concrete payload or nil layer
    pub fn resolve(&self) -> &Data {
        match self {
            Self::Any(Some(inner)) => inner.resolve(),
            Self::Ptr(PtrData {
                target: Some(inner),
                ..
            }) => inner.resolve(),
            other => other,
        }
    }

    /// Mutable counterpart of [`resolve`](Self::resolve)
    pub fn resolve_mut(&mut self) -> &mut Data {
        match self {
            Self::Any(Some(inner)) => inner.resolve_mut(),
            Self::Ptr(PtrData {
                target: Some(inner),
                ..
            }) => inner.resolve_mut(),
            other => other,
        }
    }

    /// Strip `Any` layers only, keeping pointers intact
    pub fn strip_any(&self) -> &Data {
        match self {
            Self::Any(Some(inner)) => inner.strip_any(),
            other => other,
        }
    }

    /// Box a payload into an `Any` layer
    ///
    /// Nil becomes a nil layer and an existing `Any` is kept as is.
    pub fn any(data: impl Into<Data>) -> Self {
        match data.into() {
            Self::Nil => Self::Any(None),
            any @ Self::Any(_) => any,
            other => Self::Any(Some(Box::new(other))),
        }
    }

    /// A pointer to `data`, typed by its shape
    pub fn ptr_to(data: impl Into<Data>) -> Self {
        Self::Ptr(PtrData::to(data))
    }

    /// A sequence of `Any`, the shape decoded JSON arrays take
    pub fn list<T: Into<Data>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Seq(SeqData {
            elem: Shape::Any,
            items: items.into_iter().map(Data::any).collect(),
        })
    }

    /// A map from text to `Any`, the shape decoded JSON objects take
    pub fn object<K: Into<String>, V: Into<Data>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (Data::Text(k.into()), Data::any(v)))
            .collect();
        Self::Map(MapData {
            key: Shape::TEXT,
            value: Shape::Any,
            entries: Some(entries),
        })
    }
}

// ============================================================================
// MAP
// ============================================================================

/// Insertion-ordered mapping; `entries == None` is a nil map
#[derive(Debug, Clone)]
pub struct MapData {
    key: Shape,
    value: Shape,
    entries: Option<IndexMap<Data, Data>>,
}

impl MapData {
    pub fn nil(key: Shape, value: Shape) -> Self {
        Self {
            key,
            value,
            entries: None,
        }
    }

    pub fn new(key: Shape, value: Shape) -> Self {
        Self {
            key,
            value,
            entries: Some(IndexMap::new()),
        }
    }

    /// Build a map, fitting every key and value to the declared shapes
    pub fn from_entries<K, V>(
        key: Shape,
        value: Shape,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<Data>,
        V: Into<Data>,
    {
        let mut map = Self::new(key, value);
        for (k, v) in entries {
            map.insert(k.into(), v.into(), "map")?;
        }
        Ok(map)
    }

    pub fn key_shape(&self) -> &Shape {
        &self.key
    }

    pub fn value_shape(&self) -> &Shape {
        &self.value
    }

    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &Data) -> Option<&Data> {
        self.entries.as_ref()?.get(key)
    }

    pub fn get_mut(&mut self, key: &Data) -> Option<&mut Data> {
        self.entries.as_mut()?.get_mut(key)
    }

    /// Fit and insert an entry, materializing a nil map first
    pub fn insert(&mut self, key: Data, value: Data, op: &'static str) -> Result<Option<Data>> {
        let key = self.key.fit(key, op)?;
        let value = self.value.fit(value, op)?;
        Ok(self.materialize().insert(key, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Data, &Data)> {
        self.entries.iter().flat_map(IndexMap::iter)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Data, &mut Data)> {
        self.entries.iter_mut().flat_map(IndexMap::iter_mut)
    }

    pub(crate) fn materialize(&mut self) -> &mut IndexMap<Data, Data> {
        if self.entries.is_none() {
            tracing::trace!(key = %self.key.kind(), value = %self.value.kind(), "materializing nil map");
        }
        self.entries.get_or_insert_with(IndexMap::new)
    }
}

// ============================================================================
// ARRAY / SEQUENCE
// ============================================================================

/// Fixed-capacity array
#[derive(Debug, Clone)]
pub struct ArrayData {
    elem: Shape,
    items: Vec<Data>,
}

impl ArrayData {
    /// An array of `len` zero elements
    pub fn new(elem: Shape, len: usize) -> Self {
        let items = (0..len).map(|_| elem.zero()).collect();
        Self { elem, items }
    }

    /// Build an array sized to `items`, fitting each element
    pub fn from_items<T: Into<Data>>(elem: Shape, items: impl IntoIterator<Item = T>) -> Result<Self> {
        let items = items
            .into_iter()
            .map(|item| elem.fit(item.into(), "array"))
            .collect::<Result<_>>()?;
        Ok(Self { elem, items })
    }

    pub fn elem_shape(&self) -> &Shape {
        &self.elem
    }

    pub fn items(&self) -> &[Data] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Data] {
        &mut self.items
    }
}

/// Growable sequence
#[derive(Debug, Clone)]
pub struct SeqData {
    elem: Shape,
    items: Vec<Data>,
}

impl SeqData {
    pub fn new(elem: Shape) -> Self {
        Self {
            elem,
            items: Vec::new(),
        }
    }

    /// Build a sequence, fitting each element
    pub fn from_items<T: Into<Data>>(elem: Shape, items: impl IntoIterator<Item = T>) -> Result<Self> {
        let items = items
            .into_iter()
            .map(|item| elem.fit(item.into(), "seq"))
            .collect::<Result<_>>()?;
        Ok(Self { elem, items })
    }

    pub fn elem_shape(&self) -> &Shape {
        &self.elem
    }

    pub fn items(&self) -> &[Data] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: Data) -> Result<()> {
        let item = self.elem.fit(item, "push")?;
        self.items.push(item);
        Ok(())
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Data] {
        &mut self.items
    }

    /// Overwrite `idx`, or grow to `idx + 1` zero-filling the gap
    pub(crate) fn set_or_grow(&mut self, idx: usize, item: Data) {
        if idx < self.items.len() {
            self.items[idx] = item;
            return;
        }
        tracing::trace!(from = self.items.len(), to = idx + 1, "growing sequence");
        while self.items.len() < idx {
            self.items.push(self.elem.zero());
        }
        self.items.push(item);
    }

    /// Resize to exactly `len`, zero-filling new slots
    pub(crate) fn resize(&mut self, len: usize) {
        if len < self.items.len() {
            self.items.truncate(len);
        } else {
            while self.items.len() < len {
                self.items.push(self.elem.zero());
            }
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// Record payload; `fields` line up with the shape's field list
#[derive(Debug, Clone)]
pub struct RecordData {
    shape: Arc<RecordShape>,
    fields: Vec<Data>,
}

impl RecordData {
    /// A record with every field at its zero value
    pub fn new(shape: Arc<RecordShape>) -> Self {
        let fields = shape.fields().iter().map(|f| f.shape().zero()).collect();
        Self { shape, fields }
    }

    /// Set one field, fitting the value to the field's shape
    pub fn with(mut self, name: &str, value: impl Into<Data>) -> Result<Self> {
        self.put(name, value.into(), "record")?;
        Ok(self)
    }

    pub fn shape(&self) -> &Arc<RecordShape> {
        &self.shape
    }

    pub fn fields(&self) -> &[Data] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Data> {
        self.shape.position(name).map(|idx| &self.fields[idx])
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Data> {
        let idx = self.shape.position(name)?;
        Some(&mut self.fields[idx])
    }

    /// Field names paired with their payloads, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Data)> {
        self.shape
            .fields()
            .iter()
            .map(crate::shape::FieldShape::name)
            .zip(&self.fields)
    }

    /// Field names paired with writable payloads
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Data)> {
        self.shape
            .fields()
            .iter()
            .map(crate::shape::FieldShape::name)
            .zip(&mut self.fields)
    }

    pub(crate) fn put(&mut self, name: &str, value: Data, op: &'static str) -> Result<()> {
        let idx = self
            .shape
            .position(name)
            .ok_or_else(|| ReflectError::not_exist(op, format!("{name} field")))?;
        self.fields[idx] = self.shape.fields()[idx].shape().fit(value, op)?;
        Ok(())
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [Data] {
        &mut self.fields
    }
}

// ============================================================================
// POINTER / STREAM
// ============================================================================

/// Optional reference to a pointee
#[derive(Debug, Clone)]
pub struct PtrData {
    pointee: Shape,
    target: Option<Box<Data>>,
}

impl PtrData {
    pub fn nil(pointee: Shape) -> Self {
        Self {
            pointee,
            target: None,
        }
    }

    /// A pointer to `data`, typed by its shape
    pub fn to(data: impl Into<Data>) -> Self {
        let data = data.into();
        Self {
            pointee: data.shape(),
            target: Some(Box::new(data)),
        }
    }

    pub fn pointee_shape(&self) -> &Shape {
        &self.pointee
    }

    pub fn target(&self) -> Option<&Data> {
        self.target.as_deref()
    }

    pub fn target_mut(&mut self) -> Option<&mut Data> {
        self.target.as_deref_mut()
    }

    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    /// Point at a fresh zero pointee when nil
    pub(crate) fn allocate(&mut self) -> &mut Data {
        let pointee = &self.pointee;
        self.target.get_or_insert_with(|| Box::new(pointee.zero()))
    }
}

/// Receiving end of a stream of payloads
///
/// Clones share one receiver handle, so a payload and its clones render the
/// same `chan@0x…` token. Payloads built separately from clones of one
/// receiver compare equal but render distinct tokens.
#[derive(Debug, Clone)]
pub struct StreamData {
    elem: Shape,
    rx: Option<Arc<Receiver<Data>>>,
}

impl StreamData {
    pub fn nil(elem: Shape) -> Self {
        Self { elem, rx: None }
    }

    pub fn new(elem: Shape, rx: Receiver<Data>) -> Self {
        Self {
            elem,
            rx: Some(Arc::new(rx)),
        }
    }

    pub fn elem_shape(&self) -> &Shape {
        &self.elem
    }

    pub fn receiver(&self) -> Option<&Receiver<Data>> {
        self.rx.as_deref()
    }

    /// Address of the shared receiver handle, `0` for a nil stream
    pub(crate) fn token(&self) -> usize {
        self.rx.as_ref().map_or(0, |rx| Arc::as_ptr(rx).addr())
    }
}
