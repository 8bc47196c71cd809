//! Panicking accessor variants
//!
//! Useful in tests and in code that has already checked the payload kind.

use std::net::IpAddr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use regex::Regex;
use url::Url;

use super::Value;
use crate::complex::Complex;
use crate::data::Data;
use crate::known::{ByteSize, MailAddress};

macro_rules! must {
    ($($must:ident => $name:ident: $ty:ty),* $(,)?) => {
        impl Value<'_> {
            $(
                #[doc = concat!("[`", stringify!($name), "`](Self::", stringify!($name), "), panicking with the error message on failure")]
                #[track_caller]
                pub fn $must(&self) -> $ty {
                    match self.$name() {
                        Ok(v) => v,
                        Err(err) => panic!("{err}"),
                    }
                }
            )*
        }
    };
}

must! {
    must_bool => bool: bool,
    must_int => int: isize,
    must_int8 => int8: i8,
    must_int16 => int16: i16,
    must_int32 => int32: i32,
    must_int64 => int64: i64,
    must_uint => uint: usize,
    must_uint8 => uint8: u8,
    must_uint16 => uint16: u16,
    must_uint32 => uint32: u32,
    must_uint64 => uint64: u64,
    must_float32 => float32: f32,
    must_float64 => float64: f64,
    must_complex64 => complex64: Complex<f32>,
    must_complex128 => complex128: Complex<f64>,
    must_text => text: String,
    must_bytes => bytes: Vec<u8>,
    must_duration => duration: Duration,
    must_timestamp => timestamp: DateTime<FixedOffset>,
    must_ip_addr => ip_addr: IpAddr,
    must_url => url: Option<Url>,
    must_mail_address => mail_address: MailAddress,
    must_regex => regex: Option<Regex>,
    must_byte_size => byte_size: ByteSize,
}

// ============================================================================
// Navigation and enumeration
// ============================================================================

#[track_caller]
fn or_panic<T>(res: crate::Result<T>) -> T {
    match res {
        Ok(v) => v,
        Err(err) => panic!("{err}"),
    }
}

impl Value<'_> {
    /// [`get`](Self::get), panicking with the error message on failure
    #[track_caller]
    pub fn must_get(&self, key: impl Into<Data>) -> Option<Value<'_>> {
        or_panic(self.get(key))
    }

    #[track_caller]
    pub fn must_put(&mut self, key: impl Into<Data>, val: impl Into<Data>) {
        or_panic(self.put(key, val));
    }

    #[track_caller]
    pub fn must_set(&mut self, val: impl Into<Data>) {
        or_panic(self.set(val));
    }

    #[track_caller]
    pub fn must_map(&self) -> IndexMap<Value<'_>, Value<'_>> {
        or_panic(self.map())
    }

    /// [`slice`](Self::slice), panicking with the error message on failure
    #[track_caller]
    pub fn must_slice(&self) -> Vec<Value<'_>> {
        or_panic(self.slice())
    }

    #[track_caller]
    pub fn must_alist(&self) -> Vec<(Value<'_>, Value<'_>)> {
        or_panic(self.alist())
    }

    #[track_caller]
    pub fn must_plist(&self) -> Vec<Value<'_>> {
        or_panic(self.plist())
    }
}

#[cfg(test)]
mod tests {
    use crate::data::Data;
    use crate::value::Value;

    #[test]
    fn test_must_returns_value() {
        assert_eq!(Value::new(5_i32).must_int64(), 5);
        assert_eq!(Value::new("x").must_text(), "x");
        assert!(Value::new(Data::any(true)).must_bool());
    }

    #[test]
    #[should_panic(expected = "cannot be nil")]
    fn test_must_panics_with_error_message() {
        let _ = Value::new(Data::Any(None)).must_int();
    }

    #[test]
    #[should_panic(expected = "unsupported kind")]
    fn test_must_panics_on_kind() {
        let _ = Value::new("1").must_uint8();
    }

    #[test]
    fn test_must_navigation_and_enumeration() {
        let mut doc = Value::new(Data::object([("a", 1_i64), ("b", 2_i64)]));
        doc.must_put("c", 3_i64);
        assert_eq!(doc.must_get("c").unwrap().must_int64(), 3);
        assert!(doc.must_get("missing").is_none());
        assert_eq!(doc.must_map().len(), 3);
        assert_eq!(doc.must_alist().len(), 3);
        assert_eq!(doc.must_plist().len(), 6);

        let list = Value::new(Data::list([1_i64, 2]));
        let items: Vec<i64> = list.must_slice().iter().map(|v| v.must_int64()).collect();
        assert_eq!(items, [1, 2]);

        let mut scalar = Value::new(1_i64);
        scalar.must_set(2_i64);
        assert_eq!(scalar.must_int64(), 2);
    }

    #[test]
    #[should_panic(expected = "get: value cannot be nil")]
    fn test_must_get_panics_on_nil() {
        let _ = Value::new(Data::Any(None)).must_get("k");
    }

    #[test]
    #[should_panic(expected = "slice: unsupported kind")]
    fn test_must_slice_panics_on_map() {
        let _ = Value::new(Data::object([("a", 1_i64)])).must_slice();
    }

    #[test]
    #[should_panic(expected = "put: value cannot be set")]
    fn test_must_put_panics_on_shared_handle() {
        let data = Data::object([("a", 1_i64)]);
        Value::wrap(&data).must_put("b", 2_i64);
    }
}
