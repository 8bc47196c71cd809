//! Equality and hashing for payloads
//!
//! Payloads are used as map keys, so `Data` implements `Eq` and `Hash`.
//! Floats break IEEE 754 here: every NaN equals every other NaN, and `-0.0`
//! equals `0.0`. Map payloads hash only their length so that the hash stays
//! independent of insertion order.

use std::hash::{Hash, Hasher};

use super::{ArrayData, Data, MapData, PtrData, RecordData, SeqData, StreamData};
use crate::complex::Complex;

fn f32_eq(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn f64_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn f32_bits(f: f32) -> u32 {
    if f.is_nan() {
        f32::NAN.to_bits()
    } else if f == 0.0 {
        0.0_f32.to_bits()
    } else {
        f.to_bits()
    }
}

fn f64_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0_f64.to_bits()
    } else {
        f.to_bits()
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int8(a), Self::Int8(b)) => a == b,
            (Self::Int16(a), Self::Int16(b)) => a == b,
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Uint8(a), Self::Uint8(b)) => a == b,
            (Self::Uint16(a), Self::Uint16(b)) => a == b,
            (Self::Uint32(a), Self::Uint32(b)) => a == b,
            (Self::Uint64(a), Self::Uint64(b)) => a == b,
            (Self::Float32(a), Self::Float32(b)) => f32_eq(*a, *b),
            (Self::Float64(a), Self::Float64(b)) => f64_eq(*a, *b),
            (Self::Complex64(a), Self::Complex64(b)) => f32_eq(a.re, b.re) && f32_eq(a.im, b.im),
            (Self::Complex128(a), Self::Complex128(b)) => {
                f64_eq(a.re, b.re) && f64_eq(a.im, b.im)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Ptr(a), Self::Ptr(b)) => a == b,
            (Self::Any(a), Self::Any(b)) => a == b,
            (Self::Stream(a), Self::Stream(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::IpAddr(a), Self::IpAddr(b)) => a == b,
            (Self::Url(a), Self::Url(b)) => a == b,
            (Self::MailAddress(a), Self::MailAddress(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => {
                a.as_ref().map(regex::Regex::as_str) == b.as_ref().map(regex::Regex::as_str)
            }
            (Self::ByteSize(a), Self::ByteSize(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Data {}

impl Hash for Data {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);

        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Int8(i) => i.hash(state),
            Self::Int16(i) => i.hash(state),
            Self::Int32(i) => i.hash(state),
            Self::Int64(i) => i.hash(state),
            Self::Uint(u) => u.hash(state),
            Self::Uint8(u) => u.hash(state),
            Self::Uint16(u) => u.hash(state),
            Self::Uint32(u) => u.hash(state),
            Self::Uint64(u) => u.hash(state),
            Self::Float32(f) => f32_bits(*f).hash(state),
            Self::Float64(f) => f64_bits(*f).hash(state),
            Self::Complex64(Complex { re, im }) => {
                f32_bits(*re).hash(state);
                f32_bits(*im).hash(state);
            }
            Self::Complex128(Complex { re, im }) => {
                f64_bits(*re).hash(state);
                f64_bits(*im).hash(state);
            }
            Self::Text(t) => t.hash(state),
            Self::Bytes(b) => b.hash(state),
            Self::Map(m) => m.len().hash(state),
            Self::Array(a) => a.items.hash(state),
            Self::Seq(s) => s.items.hash(state),
            Self::Record(r) => {
                r.shape.name().hash(state);
                r.fields.hash(state);
            }
            Self::Ptr(p) => p.target.hash(state),
            Self::Any(inner) => inner.hash(state),
            // channel identity has no stable hash; equality still distinguishes
            Self::Stream(_) => {}
            Self::Duration(d) => d.hash(state),
            Self::Timestamp(t) => t.hash(state),
            Self::IpAddr(ip) => ip.hash(state),
            Self::Url(u) => u.hash(state),
            Self::MailAddress(m) => m.hash(state),
            Self::Regex(r) => r.as_ref().map(regex::Regex::as_str).hash(state),
            Self::ByteSize(b) => b.hash(state),
        }
    }
}

impl PartialEq for MapData {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value && self.entries == other.entries
    }
}

impl PartialEq for ArrayData {
    fn eq(&self, other: &Self) -> bool {
        self.elem == other.elem && self.items == other.items
    }
}

impl PartialEq for SeqData {
    fn eq(&self, other: &Self) -> bool {
        self.elem == other.elem && self.items == other.items
    }
}

impl PartialEq for RecordData {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.fields == other.fields
    }
}

impl PartialEq for PtrData {
    fn eq(&self, other: &Self) -> bool {
        self.pointee == other.pointee && self.target == other.target
    }
}

impl PartialEq for StreamData {
    fn eq(&self, other: &Self) -> bool {
        self.elem == other.elem
            && match (&self.rx, &other.rx) {
                (None, None) => true,
                (Some(a), Some(b)) => a.same_channel(b),
                _ => false,
            }
    }
}
