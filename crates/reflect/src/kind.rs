//! Kind classification for dynamic payloads.
//!
//! `Kind` is the closed set of shapes every operation in this crate dispatches
//! on. It is cheap to copy and compare; the payload itself lives in
//! [`Data`](crate::Data).
//!
//! ```rust
//! use nebula_reflect::{Data, Kind};
//!
//! assert_eq!(Data::from(3_i16).kind(), Kind::Int16);
//! assert!(Kind::Int16.is_integer());
//! assert_eq!(Kind::Int16.name(), "int16");
//! ```

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Represents the kind of a payload
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// The zero payload: nothing was ever stored
    Invalid,
    Bool,
    /// Platform-width signed integer (`isize`)
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-width unsigned integer (`usize`)
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Text,
    Bytes,
    Map,
    /// Fixed-capacity array
    Array,
    /// Growable sequence
    Seq,
    Record,
    /// Optional reference to a pointee
    Ptr,
    /// Interface-like box around any payload
    Any,
    /// Blocking stream of payloads
    Stream,
    Duration,
    Timestamp,
    IpAddr,
    Url,
    MailAddress,
    Regex,
    ByteSize,
}

/// Numeric family used by the widening policy
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Family {
    Signed,
    Unsigned,
    Float,
    Complex,
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Signed => "signed integer",
            Self::Unsigned => "unsigned integer",
            Self::Float => "float",
            Self::Complex => "complex",
        })
    }
}

/// Well-known domain kinds that are parsed from canonical text
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellKnown {
    Duration,
    Timestamp,
    IpAddr,
    Url,
    MailAddress,
    Regex,
    ByteSize,
}

impl WellKnown {
    /// The kind carried by payloads of this well-known type
    pub const fn kind(self) -> Kind {
        match self {
            Self::Duration => Kind::Duration,
            Self::Timestamp => Kind::Timestamp,
            Self::IpAddr => Kind::IpAddr,
            Self::Url => Kind::Url,
            Self::MailAddress => Kind::MailAddress,
            Self::Regex => Kind::Regex,
            Self::ByteSize => Kind::ByteSize,
        }
    }
}

impl Kind {
    /// Check if this kind is a signed or unsigned integer
    pub const fn is_integer(&self) -> bool {
        matches!(self.family(), Some(Family::Signed | Family::Unsigned))
    }

    /// Check if this kind belongs to any numeric family
    pub const fn is_numeric(&self) -> bool {
        self.family().is_some()
    }

    /// Scalars are the kinds `each_do` treats as a one-element singleton
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool) || self.is_numeric()
    }

    /// Check if this kind holds keyed or indexed children
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Map | Self::Array | Self::Seq | Self::Record)
    }

    /// Check if this kind is an indirection layer (`Ptr` or `Any`)
    pub const fn is_indirect(&self) -> bool {
        matches!(self, Self::Ptr | Self::Any)
    }

    /// The well-known domain type for this kind, if any
    pub const fn well_known(&self) -> Option<WellKnown> {
        match self {
            Self::Duration => Some(WellKnown::Duration),
            Self::Timestamp => Some(WellKnown::Timestamp),
            Self::IpAddr => Some(WellKnown::IpAddr),
            Self::Url => Some(WellKnown::Url),
            Self::MailAddress => Some(WellKnown::MailAddress),
            Self::Regex => Some(WellKnown::Regex),
            Self::ByteSize => Some(WellKnown::ByteSize),
            _ => None,
        }
    }

    /// Numeric family of this kind
    pub const fn family(&self) -> Option<Family> {
        match self {
            Self::Int | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => {
                Some(Family::Signed)
            }
            Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 => {
                Some(Family::Unsigned)
            }
            Self::Float32 | Self::Float64 => Some(Family::Float),
            Self::Complex64 | Self::Complex128 => Some(Family::Complex),
            _ => None,
        }
    }

    /// Replace the platform-width integer kinds with their fixed-width equivalent
    pub const fn normalized(self) -> Self {
        match self {
            #[cfg(target_pointer_width = "64")]
            Self::Int => Self::Int64,
            #[cfg(not(target_pointer_width = "64"))]
            Self::Int => Self::Int32,
            #[cfg(target_pointer_width = "64")]
            Self::Uint => Self::Uint64,
            #[cfg(not(target_pointer_width = "64"))]
            Self::Uint => Self::Uint32,
            other => other,
        }
    }

    /// Width level inside the numeric family (1 is the narrowest)
    ///
    /// Platform-width integers are ranked as their fixed-width equivalent.
    pub const fn level(&self) -> Option<u8> {
        match self.normalized() {
            Self::Int8 | Self::Uint8 | Self::Float32 | Self::Complex64 => Some(1),
            Self::Int16 | Self::Uint16 | Self::Float64 | Self::Complex128 => Some(2),
            Self::Int32 | Self::Uint32 => Some(3),
            Self::Int64 | Self::Uint64 => Some(4),
            _ => None,
        }
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Map => "map",
            Self::Array => "array",
            Self::Seq => "seq",
            Self::Record => "record",
            Self::Ptr => "ptr",
            Self::Any => "any",
            Self::Stream => "stream",
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
            Self::IpAddr => "ip_addr",
            Self::Url => "url",
            Self::MailAddress => "mail_address",
            Self::Regex => "regex",
            Self::ByteSize => "byte_size",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_per_family() {
        assert_eq!(Kind::Int8.level(), Some(1));
        assert_eq!(Kind::Uint64.level(), Some(4));
        assert_eq!(Kind::Float64.level(), Some(2));
        assert_eq!(Kind::Complex64.level(), Some(1));
        assert_eq!(Kind::Text.level(), None);
    }

    #[test]
    fn test_native_width_normalizes() {
        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(Kind::Int.normalized(), Kind::Int64);
            assert_eq!(Kind::Uint.level(), Some(4));
        }
        #[cfg(not(target_pointer_width = "64"))]
        {
            assert_eq!(Kind::Int.normalized(), Kind::Int32);
            assert_eq!(Kind::Uint.level(), Some(3));
        }
    }

    #[test]
    fn test_classification() {
        assert!(Kind::Bool.is_scalar());
        assert!(Kind::Complex128.is_scalar());
        assert!(!Kind::Text.is_scalar());
        assert!(Kind::Record.is_composite());
        assert!(Kind::Any.is_indirect());
        assert_eq!(Kind::Regex.well_known(), Some(WellKnown::Regex));
        assert_eq!(WellKnown::ByteSize.kind(), Kind::ByteSize);
        assert_eq!(Kind::Uint16.family(), Some(Family::Unsigned));
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&Kind::MailAddress).unwrap();
        assert_eq!(json, "\"mail_address\"");
        let back: Kind = serde_json::from_str("\"int64\"").unwrap();
        assert_eq!(back, Kind::Int64);
    }
}
