//! Type-directed conversion
//!
//! The destination payload decides what a conversion means: well-known kinds
//! go through canonical text and their leaf parser, numerics widen inside
//! their family, containers recurse element by element and records bind
//! source keys to fields.
//!
//! ```
//! use nebula_reflect::{Data, Shape, Value};
//!
//! let src = Value::new(Data::list([1_i8, 2, 3]));
//! let out = src.conv_as(&Shape::seq(Shape::INT64)).unwrap();
//! assert_eq!(out.to_string(), "[1 2 3]");
//! ```

mod collection;
pub(crate) mod numeric;
mod record;

use crate::config::ConvConfig;
use crate::data::Data;
use crate::error::{ReflectError, Result};
use crate::known;
use crate::kind::Kind;
use crate::shape::Shape;
use crate::stringify;
use crate::value::Value;

const OP: &str = "conv_to";

/// Conversion engine with explicit configuration
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvConfig,
}

impl Converter {
    pub fn new(config: ConvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvConfig {
        &self.config
    }

    /// Convert `src` into the existing destination payload `dst`
    pub fn convert(&self, src: &Data, dst: &mut Data) -> Result<()> {
        self.convert_at(src, dst, 0)
    }

    /// Convert into a fresh zero value of `shape`
    pub fn convert_as(&self, src: &Data, shape: &Shape) -> Result<Data> {
        let mut dst = shape.zero();
        self.convert(src, &mut dst)?;
        Ok(dst)
    }

    pub(crate) fn convert_at(&self, src: &Data, dst: &mut Data, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(ReflectError::limit_exceeded(OP, self.config.max_depth));
        }

        let kind = dst.kind();
        if let Some(target) = kind.well_known() {
            let text = stringify::text(src)?;
            *dst = known::parse(target, &text, &self.config)?;
            return Ok(());
        }

        match dst {
            Data::Bool(b) => match scalar_source(src)? {
                Data::Bool(v) => {
                    *b = *v;
                    Ok(())
                }
                other => Err(ReflectError::unsupported(OP, other.kind())),
            },
            _ if kind.is_numeric() => {
                *dst = numeric::widen(scalar_source(src)?, kind, OP)?;
                Ok(())
            }
            Data::Text(text) => {
                *text = stringify::text(src)?;
                Ok(())
            }
            Data::Bytes(bytes) => collection::bytes(src, bytes),
            Data::Map(map) => collection::map(self, src, map, depth),
            Data::Array(array) => collection::array(self, src, array, depth),
            Data::Seq(seq) => collection::seq(self, src, seq, depth),
            Data::Record(record) => record::bind(self, src, record, depth),
            Data::Any(_) => {
                *dst = Data::any(src.strip_any().clone());
                Ok(())
            }
            Data::Ptr(ptr) => self.convert_at(src, ptr.allocate(), depth + 1),
            other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }
}

/// Resolve a source for a scalar destination; nil layers cannot convert
fn scalar_source(src: &Data) -> Result<&Data> {
    match src.resolve() {
        Data::Nil => Err(ReflectError::unsupported(OP, Kind::Invalid)),
        nil if nil.is_nil() => Err(ReflectError::nil(OP)),
        other => Ok(other),
    }
}

impl Value<'_> {
    /// Convert this payload into the destination handle
    ///
    /// The destination must be writable; a shared handle is rejected with
    /// `UnsupportedKind` before anything is converted.
    pub fn conv_to(&self, dst: &mut Value<'_>) -> Result<()> {
        let kind = dst.kind();
        let dst = dst
            .data_mut()
            .ok_or(ReflectError::unsupported(OP, kind))?;
        Converter::default().convert(self.data(), dst)
    }

    /// Convert this payload into an existing destination payload
    pub fn conv_into(&self, dst: &mut Data) -> Result<()> {
        Converter::default().convert(self.data(), dst)
    }

    /// Convert this payload into a fresh value of `shape`
    pub fn conv_as(&self, shape: &Shape) -> Result<Data> {
        Converter::default().convert_as(self.data(), shape)
    }
}
