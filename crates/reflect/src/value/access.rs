//! Typed scalar accessors
//!
//! Every accessor follows `Ptr`/`Any` layers and then accepts the payload
//! kinds that convert into its result type without loss. Native-width
//! results and narrowing from native-width sources are range-checked and
//! fail with `NumericOverflow`.

use std::net::IpAddr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use url::Url;

use super::Value;
use crate::complex::Complex;
use crate::convert::numeric;
use crate::data::Data;
use crate::error::{ReflectError, Result};
use crate::known::{ByteSize, MailAddress};
use crate::kind::Kind;
use crate::shape::Shape;

fn narrow<T, U: TryInto<T>>(v: U, op: &'static str, kind: Kind) -> Result<T> {
    v.try_into().map_err(|_| ReflectError::overflow(op, kind))
}

impl Value<'_> {
    /// Resolved payload for a scalar read
    fn scalar(&self, op: &'static str) -> Result<&Data> {
        match self.data().resolve() {
            Data::Nil => Err(ReflectError::unsupported(op, Kind::Invalid)),
            nil if nil.is_nil() => Err(ReflectError::nil(op)),
            other => Ok(other),
        }
    }

    pub fn bool(&self) -> Result<bool> {
        const OP: &str = "bool";
        match *self.scalar(OP)? {
            Data::Bool(b) => Ok(b),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    // ========================================================================
    // Signed
    // ========================================================================

    /// Platform-width signed integer
    pub fn int(&self) -> Result<isize> {
        const OP: &str = "int";
        match *self.scalar(OP)? {
            Data::Int(v) => Ok(v),
            Data::Int8(v) => Ok(v.into()),
            Data::Int16(v) => Ok(v.into()),
            Data::Uint8(v) => Ok(v.into()),
            Data::Int32(v) => narrow(v, OP, Kind::Int),
            Data::Int64(v) => narrow(v, OP, Kind::Int),
            Data::Uint16(v) => narrow(v, OP, Kind::Int),
            Data::Uint32(v) => narrow(v, OP, Kind::Int),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn int8(&self) -> Result<i8> {
        const OP: &str = "int8";
        match *self.scalar(OP)? {
            Data::Int8(v) => Ok(v),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn int16(&self) -> Result<i16> {
        const OP: &str = "int16";
        match *self.scalar(OP)? {
            Data::Int8(v) => Ok(v.into()),
            Data::Int16(v) => Ok(v),
            Data::Uint8(v) => Ok(v.into()),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn int32(&self) -> Result<i32> {
        const OP: &str = "int32";
        match *self.scalar(OP)? {
            Data::Int8(v) => Ok(v.into()),
            Data::Int16(v) => Ok(v.into()),
            Data::Int32(v) => Ok(v),
            Data::Uint8(v) => Ok(v.into()),
            Data::Uint16(v) => Ok(v.into()),
            Data::Int(v) => narrow(v, OP, Kind::Int32),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn int64(&self) -> Result<i64> {
        const OP: &str = "int64";
        match *self.scalar(OP)? {
            Data::Int8(v) => Ok(v.into()),
            Data::Int16(v) => Ok(v.into()),
            Data::Int32(v) => Ok(v.into()),
            Data::Int64(v) => Ok(v),
            Data::Uint8(v) => Ok(v.into()),
            Data::Uint16(v) => Ok(v.into()),
            Data::Uint32(v) => Ok(v.into()),
            Data::Int(v) => narrow(v, OP, Kind::Int64),
            Data::Uint(v) => narrow(v, OP, Kind::Int64),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    // ========================================================================
    // Unsigned
    // ========================================================================

    /// Platform-width unsigned integer
    pub fn uint(&self) -> Result<usize> {
        const OP: &str = "uint";
        match *self.scalar(OP)? {
            Data::Uint(v) => Ok(v),
            Data::Uint8(v) => Ok(v.into()),
            Data::Uint16(v) => Ok(v.into()),
            Data::Uint32(v) => narrow(v, OP, Kind::Uint),
            Data::Uint64(v) => narrow(v, OP, Kind::Uint),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn uint8(&self) -> Result<u8> {
        const OP: &str = "uint8";
        match *self.scalar(OP)? {
            Data::Uint8(v) => Ok(v),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn uint16(&self) -> Result<u16> {
        const OP: &str = "uint16";
        match *self.scalar(OP)? {
            Data::Uint8(v) => Ok(v.into()),
            Data::Uint16(v) => Ok(v),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn uint32(&self) -> Result<u32> {
        const OP: &str = "uint32";
        match *self.scalar(OP)? {
            Data::Uint8(v) => Ok(v.into()),
            Data::Uint16(v) => Ok(v.into()),
            Data::Uint32(v) => Ok(v),
            Data::Uint(v) => narrow(v, OP, Kind::Uint32),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn uint64(&self) -> Result<u64> {
        const OP: &str = "uint64";
        match *self.scalar(OP)? {
            Data::Uint8(v) => Ok(v.into()),
            Data::Uint16(v) => Ok(v.into()),
            Data::Uint32(v) => Ok(v.into()),
            Data::Uint64(v) => Ok(v),
            Data::Uint(v) => narrow(v, OP, Kind::Uint64),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    // ========================================================================
    // Float / complex
    // ========================================================================

    /// Any integer or `Float32`
    #[allow(clippy::cast_precision_loss)]
    pub fn float32(&self) -> Result<f32> {
        const OP: &str = "float32";
        let data = self.scalar(OP)?;
        if let Some(v) = numeric::integer(data) {
            return Ok(v as f32);
        }
        match *data {
            Data::Float32(v) => Ok(v),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    /// Any integer or float
    #[allow(clippy::cast_precision_loss)]
    pub fn float64(&self) -> Result<f64> {
        const OP: &str = "float64";
        let data = self.scalar(OP)?;
        if let Some(v) = numeric::integer(data) {
            return Ok(v as f64);
        }
        match *data {
            Data::Float32(v) => Ok(v.into()),
            Data::Float64(v) => Ok(v),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn complex64(&self) -> Result<Complex<f32>> {
        const OP: &str = "complex64";
        let data = self.scalar(OP)?;
        if let Some(v) = numeric::integer(data) {
            return Ok(Complex::new(v as f32, 0.0));
        }
        match *data {
            Data::Float32(v) => Ok(v.into()),
            Data::Complex64(c) => Ok(c),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn complex128(&self) -> Result<Complex<f64>> {
        const OP: &str = "complex128";
        let data = self.scalar(OP)?;
        if let Some(v) = numeric::integer(data) {
            return Ok(Complex::new(v as f64, 0.0));
        }
        match *data {
            Data::Float32(v) => Ok(f64::from(v).into()),
            Data::Float64(v) => Ok(v.into()),
            Data::Complex64(c) => Ok(c.into()),
            Data::Complex128(c) => Ok(c),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    // ========================================================================
    // Text / bytes
    // ========================================================================

    /// Canonical text of the payload; nil layers read as `""`
    pub fn text(&self) -> Result<String> {
        crate::stringify::text(self.data())
    }

    /// Raw bytes, or the elements of a `Uint8` array or sequence
    pub fn bytes(&self) -> Result<Vec<u8>> {
        const OP: &str = "bytes";
        let items = match self.scalar(OP)? {
            Data::Bytes(bytes) => return Ok(bytes.clone()),
            Data::Array(array) if *array.elem_shape() == Shape::UINT8 => array.items(),
            Data::Seq(seq) if *seq.elem_shape() == Shape::UINT8 => seq.items(),
            other => return Err(ReflectError::unsupported(OP, other.kind())),
        };
        items
            .iter()
            .map(|item| match *item {
                Data::Uint8(b) => Ok(b),
                ref other => Err(ReflectError::unsupported(OP, other.kind())),
            })
            .collect()
    }

    // ========================================================================
    // Well-known
    // ========================================================================

    pub fn duration(&self) -> Result<Duration> {
        const OP: &str = "duration";
        match *self.scalar(OP)? {
            Data::Duration(d) => Ok(d),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn timestamp(&self) -> Result<DateTime<FixedOffset>> {
        const OP: &str = "timestamp";
        match *self.scalar(OP)? {
            Data::Timestamp(ts) => Ok(ts),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn ip_addr(&self) -> Result<IpAddr> {
        const OP: &str = "ip_addr";
        match *self.scalar(OP)? {
            Data::IpAddr(ip) => Ok(ip),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    /// URL payload; `None` is the zero URL
    pub fn url(&self) -> Result<Option<Url>> {
        const OP: &str = "url";
        match self.scalar(OP)? {
            Data::Url(url) => Ok(url.clone()),
            other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn mail_address(&self) -> Result<MailAddress> {
        const OP: &str = "mail_address";
        match self.scalar(OP)? {
            Data::MailAddress(addr) => Ok(addr.clone()),
            other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    /// Regex payload; `None` is the zero regex
    pub fn regex(&self) -> Result<Option<Regex>> {
        const OP: &str = "regex";
        match self.scalar(OP)? {
            Data::Regex(re) => Ok(re.clone()),
            other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }

    pub fn byte_size(&self) -> Result<ByteSize> {
        const OP: &str = "byte_size";
        match *self.scalar(OP)? {
            Data::ByteSize(size) => Ok(size),
            ref other => Err(ReflectError::unsupported(OP, other.kind())),
        }
    }
}
