//! Conversions from native Rust values into payloads

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use url::Url;

use super::{ArrayData, Data, MapData, PtrData, RecordData, SeqData, StreamData};
use crate::complex::Complex;
use crate::known::{ByteSize, MailAddress};

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Data {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Complex<f32> => Complex64,
    Complex<f64> => Complex128,
    String => Text,
    Vec<u8> => Bytes,
    MapData => Map,
    ArrayData => Array,
    SeqData => Seq,
    RecordData => Record,
    PtrData => Ptr,
    StreamData => Stream,
    Duration => Duration,
    DateTime<FixedOffset> => Timestamp,
    IpAddr => IpAddr,
    MailAddress => MailAddress,
    ByteSize => ByteSize,
}

impl From<&str> for Data {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&[u8]> for Data {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<DateTime<Utc>> for Data {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value.fixed_offset())
    }
}

impl From<Ipv4Addr> for Data {
    fn from(value: Ipv4Addr) -> Self {
        Self::IpAddr(value.into())
    }
}

impl From<Ipv6Addr> for Data {
    fn from(value: Ipv6Addr) -> Self {
        Self::IpAddr(value.into())
    }
}

impl From<Url> for Data {
    fn from(value: Url) -> Self {
        Self::Url(Some(value))
    }
}

impl From<Regex> for Data {
    fn from(value: Regex) -> Self {
        Self::Regex(Some(value))
    }
}
