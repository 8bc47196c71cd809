//! Static descriptions of payloads
//!
//! A [`Shape`] is what a destination *is* before anything is stored in it:
//! container element types, record fields and their binding tags. Shapes
//! materialize zero values and decide whether a payload fits a slot.
//!
//! ```
//! use nebula_reflect::{FieldShape, RecordShape, Shape};
//!
//! let config = RecordShape::builder("Config")
//!     .field(FieldShape::new("A", Shape::INT64).tag("a"))
//!     .field(FieldShape::new("B", Shape::INT64).tag("_"))
//!     .field(FieldShape::new("D", Shape::DURATION))
//!     .build();
//!
//! assert_eq!(config.fields().len(), 3);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::data::{ArrayData, Data, MapData, PtrData, RecordData, SeqData, StreamData};
use crate::error::{ReflectError, Result};
use crate::known::{ByteSize, MailAddress, zero_timestamp};
use crate::kind::Kind;

// ============================================================================
// SHAPE
// ============================================================================

/// Static description of a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Leaf kinds: bool, numerics, text, bytes and the well-known kinds
    Scalar(Kind),
    Map(Box<Shape>, Box<Shape>),
    Array(Box<Shape>, usize),
    Seq(Box<Shape>),
    Record(Arc<RecordShape>),
    Ptr(Box<Shape>),
    Any,
    Stream(Box<Shape>),
}

impl Shape {
    pub const BOOL: Self = Self::Scalar(Kind::Bool);
    pub const INT: Self = Self::Scalar(Kind::Int);
    pub const INT8: Self = Self::Scalar(Kind::Int8);
    pub const INT16: Self = Self::Scalar(Kind::Int16);
    pub const INT32: Self = Self::Scalar(Kind::Int32);
    pub const INT64: Self = Self::Scalar(Kind::Int64);
    pub const UINT: Self = Self::Scalar(Kind::Uint);
    pub const UINT8: Self = Self::Scalar(Kind::Uint8);
    pub const UINT16: Self = Self::Scalar(Kind::Uint16);
    pub const UINT32: Self = Self::Scalar(Kind::Uint32);
    pub const UINT64: Self = Self::Scalar(Kind::Uint64);
    pub const FLOAT32: Self = Self::Scalar(Kind::Float32);
    pub const FLOAT64: Self = Self::Scalar(Kind::Float64);
    pub const COMPLEX64: Self = Self::Scalar(Kind::Complex64);
    pub const COMPLEX128: Self = Self::Scalar(Kind::Complex128);
    pub const TEXT: Self = Self::Scalar(Kind::Text);
    pub const BYTES: Self = Self::Scalar(Kind::Bytes);
    pub const DURATION: Self = Self::Scalar(Kind::Duration);
    pub const TIMESTAMP: Self = Self::Scalar(Kind::Timestamp);
    pub const IP_ADDR: Self = Self::Scalar(Kind::IpAddr);
    pub const URL: Self = Self::Scalar(Kind::Url);
    pub const MAIL_ADDRESS: Self = Self::Scalar(Kind::MailAddress);
    pub const REGEX: Self = Self::Scalar(Kind::Regex);
    pub const BYTE_SIZE: Self = Self::Scalar(Kind::ByteSize);
    /// Shape of the nil payload
    pub const INVALID: Self = Self::Scalar(Kind::Invalid);

    pub fn map(key: Shape, value: Shape) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn array(elem: Shape, len: usize) -> Self {
        Self::Array(Box::new(elem), len)
    }

    pub fn seq(elem: Shape) -> Self {
        Self::Seq(Box::new(elem))
    }

    pub fn ptr(pointee: Shape) -> Self {
        Self::Ptr(Box::new(pointee))
    }

    pub fn stream(elem: Shape) -> Self {
        Self::Stream(Box::new(elem))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Scalar(kind) => *kind,
            Self::Map(..) => Kind::Map,
            Self::Array(..) => Kind::Array,
            Self::Seq(_) => Kind::Seq,
            Self::Record(_) => Kind::Record,
            Self::Ptr(_) => Kind::Ptr,
            Self::Any => Kind::Any,
            Self::Stream(_) => Kind::Stream,
        }
    }

    /// First pair of differing kinds between two shapes, outermost first
    ///
    /// `None` for equal shapes. Shapes that differ only in array length or
    /// record identity report their own kinds.
    pub fn mismatch(&self, other: &Shape) -> Option<(Kind, Kind)> {
        if self == other {
            return None;
        }
        let nested = match (self, other) {
            (Self::Map(k1, v1), Self::Map(k2, v2)) => k1.mismatch(k2).or_else(|| v1.mismatch(v2)),
            (Self::Array(a, _), Self::Array(b, _))
            | (Self::Seq(a), Self::Seq(b))
            | (Self::Ptr(a), Self::Ptr(b))
            | (Self::Stream(a), Self::Stream(b)) => a.mismatch(b),
            (Self::Record(a), Self::Record(b)) if a.fields().len() == b.fields().len() => a
                .fields()
                .iter()
                .zip(b.fields())
                .find_map(|(x, y)| x.shape().mismatch(y.shape())),
            _ => None,
        };
        Some(nested.unwrap_or((self.kind(), other.kind())))
    }

    /// Materialize the zero value of this shape
    ///
    /// Containers start nil (maps, pointers, streams) or empty (sequences);
    /// arrays are filled with zero elements.
    pub fn zero(&self) -> Data {
        match self {
            Self::Scalar(kind) => zero_scalar(*kind),
            Self::Map(key, value) => Data::Map(MapData::nil((**key).clone(), (**value).clone())),
            Self::Array(elem, len) => Data::Array(ArrayData::new((**elem).clone(), *len)),
            Self::Seq(elem) => Data::Seq(SeqData::new((**elem).clone())),
            Self::Record(record) => Data::Record(RecordData::new(Arc::clone(record))),
            Self::Ptr(pointee) => Data::Ptr(PtrData::nil((**pointee).clone())),
            Self::Any => Data::Any(None),
            Self::Stream(elem) => Data::Stream(StreamData::nil((**elem).clone())),
        }
    }

    /// Fit `data` into a slot of this shape
    ///
    /// `Any` slots box the payload, integers move losslessly between integer
    /// kinds, and nil fits pointer slots. Everything else must match exactly.
    pub fn fit(&self, data: Data, op: &'static str) -> Result<Data> {
        match (self, data) {
            (Self::Any, Data::Nil) => Ok(Data::Any(None)),
            (Self::Any, data @ Data::Any(_)) => Ok(data),
            (Self::Any, data) => Ok(Data::Any(Some(Box::new(data)))),
            (Self::Ptr(pointee), Data::Nil) => Ok(Data::Ptr(PtrData::nil((**pointee).clone()))),
            (Self::Scalar(kind), data) if kind.is_integer() && data.kind().is_integer() => {
                crate::convert::numeric::refit_integer(&data, *kind)
                    .ok_or(ReflectError::overflow(op, *kind))
            }
            (shape, data) => {
                if *shape == data.shape() {
                    Ok(data)
                } else {
                    Err(ReflectError::type_unequal(op, shape.kind(), data.kind()))
                }
            }
        }
    }
}

fn zero_scalar(kind: Kind) -> Data {
    match kind {
        Kind::Bool => Data::Bool(false),
        Kind::Int => Data::Int(0),
        Kind::Int8 => Data::Int8(0),
        Kind::Int16 => Data::Int16(0),
        Kind::Int32 => Data::Int32(0),
        Kind::Int64 => Data::Int64(0),
        Kind::Uint => Data::Uint(0),
        Kind::Uint8 => Data::Uint8(0),
        Kind::Uint16 => Data::Uint16(0),
        Kind::Uint32 => Data::Uint32(0),
        Kind::Uint64 => Data::Uint64(0),
        Kind::Float32 => Data::Float32(0.0),
        Kind::Float64 => Data::Float64(0.0),
        Kind::Complex64 => Data::Complex64(Default::default()),
        Kind::Complex128 => Data::Complex128(Default::default()),
        Kind::Text => Data::Text(String::new()),
        Kind::Bytes => Data::Bytes(Vec::new()),
        Kind::Duration => Data::Duration(Default::default()),
        Kind::Timestamp => Data::Timestamp(zero_timestamp()),
        Kind::IpAddr => Data::IpAddr(std::net::Ipv4Addr::UNSPECIFIED.into()),
        Kind::Url => Data::Url(None),
        Kind::MailAddress => Data::MailAddress(MailAddress::default()),
        Kind::Regex => Data::Regex(None),
        Kind::ByteSize => Data::ByteSize(ByteSize::default()),
        Kind::Any => Data::Any(None),
        // Structural kinds have no meaningful zero without their element shapes
        Kind::Invalid
        | Kind::Map
        | Kind::Array
        | Kind::Seq
        | Kind::Record
        | Kind::Ptr
        | Kind::Stream => Data::Nil,
    }
}

// ============================================================================
// RECORD SHAPE
// ============================================================================

/// How a record field is matched by the record binding of a conversion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldBinding {
    /// Matched by field name under the record's case policy
    ByName,
    /// Matched only by this exact key
    Key(String),
    /// Never bound; a source key naming this field is skipped
    Passthrough,
}

/// One field of a record shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    name: String,
    shape: Shape,
    tag: Option<String>,
}

impl FieldShape {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            tag: None,
        }
    }

    /// Attach a binding tag: `"_"` for passthrough, anything else as a custom key
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn binding(&self) -> FieldBinding {
        match self.tag.as_deref() {
            None | Some("") => FieldBinding::ByName,
            Some("_") => FieldBinding::Passthrough,
            Some(key) => FieldBinding::Key(key.to_owned()),
        }
    }
}

/// Named record type with ordered fields
#[derive(Debug)]
pub struct RecordShape {
    name: String,
    fields: Vec<FieldShape>,
    bindings: OnceCell<BindingTable>,
}

impl RecordShape {
    pub fn builder(name: impl Into<String>) -> RecordShapeBuilder {
        RecordShapeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    /// Index of the field with this exact name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Binding table, derived on first use and cached for the shape's lifetime
    pub fn bindings(&self) -> &BindingTable {
        self.bindings.get_or_init(|| BindingTable::derive(&self.fields))
    }
}

impl PartialEq for RecordShape {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other) || (self.name == other.name && self.fields == other.fields)
    }
}

impl Eq for RecordShape {}

/// Builder for [`RecordShape`]
#[derive(Debug)]
pub struct RecordShapeBuilder {
    name: String,
    fields: Vec<FieldShape>,
}

impl RecordShapeBuilder {
    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Arc<RecordShape> {
        Arc::new(RecordShape {
            name: self.name,
            fields: self.fields,
            bindings: OnceCell::new(),
        })
    }
}

/// Field lookup tables used by record conversion
#[derive(Debug, Default)]
pub struct BindingTable {
    passthrough: HashSet<String>,
    custom: HashMap<String, usize>,
    exact: HashMap<String, usize>,
    lower: HashMap<String, usize>,
}

impl BindingTable {
    fn derive(fields: &[FieldShape]) -> Self {
        let mut table = Self::default();
        for (idx, field) in fields.iter().enumerate() {
            match field.binding() {
                FieldBinding::Passthrough => {
                    table.passthrough.insert(field.name.clone());
                }
                FieldBinding::Key(key) => {
                    table.custom.insert(key, idx);
                }
                FieldBinding::ByName => {
                    table.exact.insert(field.name.clone(), idx);
                    table.lower.insert(field.name.to_lowercase(), idx);
                }
            }
        }
        table
    }

    /// A source key naming a passthrough field
    pub fn is_passthrough(&self, key: &str) -> bool {
        self.passthrough.contains(key)
    }

    /// Resolve a source key to a field index
    ///
    /// Custom keys win; default-class fields then match case-insensitively
    /// unless `match_case` is set.
    pub fn lookup(&self, key: &str, match_case: bool) -> Option<usize> {
        if let Some(idx) = self.custom.get(key) {
            return Some(*idx);
        }
        if match_case {
            self.exact.get(key).copied()
        } else {
            self.lower.get(key).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mismatch_reports_nested_kinds() {
        assert_eq!(Shape::INT.mismatch(&Shape::INT), None);
        assert_eq!(
            Shape::INT32.mismatch(&Shape::seq(Shape::INT32)),
            Some((Kind::Int32, Kind::Seq))
        );
        assert_eq!(
            Shape::seq(Shape::TEXT).mismatch(&Shape::seq(Shape::INT64)),
            Some((Kind::Text, Kind::Int64))
        );
        assert_eq!(
            Shape::map(Shape::TEXT, Shape::ptr(Shape::BOOL))
                .mismatch(&Shape::map(Shape::TEXT, Shape::ptr(Shape::UINT8))),
            Some((Kind::Bool, Kind::Uint8))
        );
        assert_eq!(
            Shape::array(Shape::INT, 2).mismatch(&Shape::array(Shape::INT, 3)),
            Some((Kind::Array, Kind::Array))
        );
    }

    fn sample() -> Arc<RecordShape> {
        RecordShape::builder("Sample")
            .field(FieldShape::new("A", Shape::INT64).tag("a"))
            .field(FieldShape::new("B", Shape::INT64).tag("_"))
            .field(FieldShape::new("Count", Shape::INT64))
            .field(FieldShape::new("Empty", Shape::TEXT).tag(""))
            .build()
    }

    #[test]
    fn test_field_binding_classes() {
        let shape = sample();
        let bindings: Vec<_> = shape.fields().iter().map(FieldShape::binding).collect();
        assert_eq!(
            bindings,
            vec![
                FieldBinding::Key("a".into()),
                FieldBinding::Passthrough,
                FieldBinding::ByName,
                FieldBinding::ByName,
            ]
        );
    }

    #[test]
    fn test_binding_lookup() {
        let shape = sample();
        let table = shape.bindings();
        assert!(table.is_passthrough("B"));
        assert!(!table.is_passthrough("b"));
        assert_eq!(table.lookup("a", false), Some(0));
        assert_eq!(table.lookup("a", true), Some(0));
        assert_eq!(table.lookup("count", false), Some(2));
        assert_eq!(table.lookup("count", true), None);
        assert_eq!(table.lookup("Count", true), Some(2));
        // custom-keyed fields never match by name
        assert_eq!(table.lookup("A", true), None);
    }

    #[test]
    fn test_bindings_are_cached() {
        let shape = sample();
        let first: *const BindingTable = shape.bindings();
        let second: *const BindingTable = shape.bindings();
        assert!(core::ptr::eq(first, second));
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(Shape::INT16.zero(), Data::Int16(0));
        assert_eq!(Shape::TEXT.zero(), Data::Text(String::new()));
        assert_eq!(Shape::Any.zero(), Data::Any(None));

        let array = Shape::array(Shape::UINT8, 3).zero();
        match array {
            Data::Array(a) => assert_eq!(a.items().to_vec(), vec![Data::Uint8(0); 3]),
            other => panic!("unexpected {other:?}"),
        }

        let map = Shape::map(Shape::TEXT, Shape::INT).zero();
        match map {
            Data::Map(m) => assert!(m.is_nil()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_fit() {
        assert_eq!(
            Shape::Any.fit(Data::Int64(1), "put").unwrap(),
            Data::Any(Some(Box::new(Data::Int64(1))))
        );
        assert_eq!(Shape::INT8.fit(Data::Int64(7), "put").unwrap(), Data::Int8(7));
        assert_eq!(Shape::UINT16.fit(Data::Int32(9), "put").unwrap(), Data::Uint16(9));

        let err = Shape::INT8.fit(Data::Int64(300), "put").unwrap_err();
        assert_eq!(err.code(), "REFLECT_NUMERIC_OVERFLOW");

        let err = Shape::UINT8.fit(Data::Int8(-1), "put").unwrap_err();
        assert_eq!(err.code(), "REFLECT_NUMERIC_OVERFLOW");

        let err = Shape::TEXT.fit(Data::Int64(1), "put").unwrap_err();
        assert_eq!(err.code(), "REFLECT_TYPE_UNEQUAL");

        let err = Shape::seq(Shape::TEXT)
            .fit(Shape::seq(Shape::INT).zero(), "put")
            .unwrap_err();
        assert_eq!(err.code(), "REFLECT_TYPE_UNEQUAL");
    }
}
