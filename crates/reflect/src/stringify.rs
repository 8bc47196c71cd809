//! Canonical text of payloads
//!
//! `Display` for [`Data`] is the structural rendering used for containers;
//! [`text`] is the canonical stringification used by accessors and by the
//! conversion engine. Unlike `Display`, it renders nil as the empty string.
//!
//! Floats render with the shortest digits that round-trip at their own
//! width, in decimal form when the decimal exponent lies in `[-4, 6)` and as
//! `d.ddde±XX` otherwise.

use core::fmt::{self, Display, Formatter, Write};

use crate::data::Data;
use crate::error::Result;

/// Canonical text of a payload, following indirection layers
///
/// The nil payload and nil `Ptr`/`Any` layers yield `""`, so a JSON `null`
/// bound to a text slot stays empty.
pub fn text(data: &Data) -> Result<String> {
    match data.resolve() {
        nil if nil.is_nil() => Ok(String::new()),
        Data::Text(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

pub(crate) fn float32(v: f32) -> String {
    if let Some(special) = special(v.is_nan(), v.is_infinite(), v.is_sign_negative()) {
        return special.to_owned();
    }
    shortest(&format!("{v:e}"))
}

pub(crate) fn float64(v: f64) -> String {
    if let Some(special) = special(v.is_nan(), v.is_infinite(), v.is_sign_negative()) {
        return special.to_owned();
    }
    shortest(&format!("{v:e}"))
}

/// Prefix `+` unless the text already carries a sign
pub(crate) fn signed(text: String) -> String {
    if text.starts_with(['+', '-']) {
        text
    } else {
        format!("+{text}")
    }
}

fn special(nan: bool, infinite: bool, negative: bool) -> Option<&'static str> {
    match (nan, infinite, negative) {
        (true, _, _) => Some("NaN"),
        (false, true, false) => Some("+Inf"),
        (false, true, true) => Some("-Inf"),
        _ => None,
    }
}

/// Reformat Rust's shortest scientific text (`-1.25e-5`)
fn shortest(sci: &str) -> String {
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci.to_owned();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci.to_owned();
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if (-4..6).contains(&exp) {
        if exp >= 0 {
            let point = exp as usize + 1;
            if digits.len() <= point {
                out.push_str(&digits);
                out.extend(std::iter::repeat_n('0', point - digits.len()));
            } else {
                out.push_str(&digits[..point]);
                out.push('.');
                out.push_str(&digits[point..]);
            }
        } else {
            out.push_str("0.");
            out.extend(std::iter::repeat_n('0', (-exp - 1) as usize));
            out.push_str(&digits);
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exp < 0 { '-' } else { '+' };
        let _ = write!(out, "e{sign}{:02}", exp.unsigned_abs());
    }
    out
}

fn join<T: Display>(f: &mut Formatter<'_>, items: impl IntoIterator<Item = T>) -> fmt::Result {
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Data {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil | Self::Any(None) => f.write_str("<nil>"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Int8(i) => write!(f, "{i}"),
            Self::Int16(i) => write!(f, "{i}"),
            Self::Int32(i) => write!(f, "{i}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Uint8(u) => write!(f, "{u}"),
            Self::Uint16(u) => write!(f, "{u}"),
            Self::Uint32(u) => write!(f, "{u}"),
            Self::Uint64(u) => write!(f, "{u}"),
            Self::Float32(v) => f.write_str(&float32(*v)),
            Self::Float64(v) => f.write_str(&float64(*v)),
            Self::Complex64(c) => write!(f, "{c}"),
            Self::Complex128(c) => write!(f, "{c}"),
            Self::Text(s) => f.write_str(s),
            Self::Bytes(bytes) => {
                f.write_char('[')?;
                join(f, bytes)?;
                f.write_char(']')
            }
            Self::Map(map) => {
                f.write_str("map[")?;
                for (idx, (k, v)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_char(']')
            }
            Self::Array(array) => {
                f.write_char('[')?;
                join(f, array.items())?;
                f.write_char(']')
            }
            Self::Seq(seq) => {
                f.write_char('[')?;
                join(f, seq.items())?;
                f.write_char(']')
            }
            Self::Record(record) => {
                write!(f, "{}{{", record.shape().name())?;
                for (idx, (name, v)) in record.iter().enumerate() {
                    if idx > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{name}:{v}")?;
                }
                f.write_char('}')
            }
            Self::Ptr(ptr) => match ptr.target() {
                Some(target) => write!(f, "{target}"),
                None => f.write_str("<nil>"),
            },
            Self::Any(Some(inner)) => write!(f, "{inner}"),
            Self::Stream(stream) => write!(f, "chan@{:#x}", stream.token()),
            Self::Duration(d) => write!(f, "{}", humantime::format_duration(*d)),
            Self::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
            Self::IpAddr(ip) => write!(f, "{ip}"),
            Self::Url(url) => f.write_str(url.as_ref().map_or("", url::Url::as_str)),
            Self::MailAddress(addr) => write!(f, "{addr}"),
            Self::Regex(re) => f.write_str(re.as_ref().map_or("", regex::Regex::as_str)),
            Self::ByteSize(size) => write!(f, "{size}"),
        }
    }
}
