//! # nebula-reflect
//!
//! Uniform access to dynamically typed values.
//!
//! A [`Value`] wraps one [`Data`] payload and offers:
//!
//! - navigation by map key, index or field name (`get`, `get_mut`, `put`,
//!   `set`);
//! - enumeration as associations, pairs or flattened lists (`map`, `slice`,
//!   `alist`, `plist`, `each_do`), including blocking streams;
//! - typed accessors with explicit width rules (`int64`, `float32`, `text`,
//!   `duration`, ...);
//! - a conversion engine that maps an untyped tree onto a typed destination
//!   described by a [`Shape`], binding record fields by name or tag and
//!   parsing well-known domain types from their canonical text.
//!
//! ```
//! use nebula_reflect::{Data, FieldShape, RecordShape, Shape, Value};
//!
//! let shape = RecordShape::builder("Server")
//!     .field(FieldShape::new("Host", Shape::TEXT))
//!     .field(FieldShape::new("Timeout", Shape::DURATION))
//!     .build();
//!
//! let src = Value::new(Data::object([("host", "localhost"), ("timeout", "30s")]));
//! let server = src.conv_as(&Shape::Record(shape)).unwrap();
//! assert_eq!(server.to_string(), "Server{Host:localhost Timeout:30s}");
//! ```

#![warn(clippy::all)]

pub mod complex;
pub mod config;
pub mod convert;
pub mod data;
pub mod error;
pub mod kind;
pub mod known;
pub mod shape;
pub mod stringify;
pub mod value;

pub use complex::Complex;
pub use config::ConvConfig;
pub use convert::Converter;
pub use data::{ArrayData, Data, MapData, PtrData, RecordData, SeqData, StreamData};
pub use error::{ParseError, ReflectError, Result};
pub use kind::{Family, Kind, WellKnown};
pub use known::{ByteSize, MailAddress};
pub use shape::{BindingTable, FieldBinding, FieldShape, RecordShape, RecordShapeBuilder, Shape};
pub use stringify::text;
pub use value::Value;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{ConvConfig, Converter, Data, FieldShape, Kind, RecordShape, ReflectError, Shape, Value};
}
