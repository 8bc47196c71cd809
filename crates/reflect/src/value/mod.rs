//! The `Value` handle
//!
//! A [`Value`] wraps exactly one payload. Where it lives decides what the
//! handle may do:
//!
//! - [`Value::new`] owns its payload and is writable;
//! - [`Value::wrap`] borrows a payload shared, and every write fails with
//!   `CannotSet`;
//! - [`Value::wrap_mut`] borrows a payload exclusively, so writes land in the
//!   caller's composite.
//!
//! ```
//! use nebula_reflect::{Data, Value};
//!
//! let mut data = Data::object([("name", "nebula")]);
//! {
//!     let mut value = Value::wrap_mut(&mut data);
//!     value.put("kind", "reflect").unwrap();
//! }
//! let value = Value::wrap(&data);
//! assert_eq!(value.get("kind").unwrap().unwrap().text().unwrap(), "reflect");
//! ```

mod access;
pub(crate) mod enumerate;
mod must;
mod navigate;

use core::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::data::Data;
use crate::kind::Kind;

enum Slot<'a> {
    Owned(Data),
    Shared(&'a Data),
    Exclusive(&'a mut Data),
}

/// Handle over one payload
pub struct Value<'a> {
    slot: Slot<'a>,
}

impl Value<'static> {
    /// Own a payload; the handle is writable
    pub fn new(data: impl Into<Data>) -> Self {
        Self {
            slot: Slot::Owned(data.into()),
        }
    }
}

impl<'a> Value<'a> {
    /// Read-only handle over a borrowed payload
    pub fn wrap(data: &'a Data) -> Self {
        Self {
            slot: Slot::Shared(data),
        }
    }

    /// Writable handle into a caller's payload
    pub fn wrap_mut(data: &'a mut Data) -> Self {
        Self {
            slot: Slot::Exclusive(data),
        }
    }

    pub fn data(&self) -> &Data {
        match &self.slot {
            Slot::Owned(data) => data,
            Slot::Shared(data) => *data,
            Slot::Exclusive(data) => &**data,
        }
    }

    /// Mutable payload, or `None` for read-only handles
    pub fn data_mut(&mut self) -> Option<&mut Data> {
        match &mut self.slot {
            Slot::Owned(data) => Some(data),
            Slot::Shared(_) => None,
            Slot::Exclusive(data) => Some(&mut **data),
        }
    }

    /// Take the payload out, cloning it when borrowed
    pub fn into_data(self) -> Data {
        match self.slot {
            Slot::Owned(data) => data,
            Slot::Shared(data) => data.clone(),
            Slot::Exclusive(data) => data.clone(),
        }
    }

    /// Detach from any borrow by cloning the payload
    pub fn to_owned_value(&self) -> Value<'static> {
        Value::new(self.data().clone())
    }

    /// Kind of the payload itself, `Ptr`/`Any` layers included
    pub fn kind(&self) -> Kind {
        self.data().kind()
    }

    /// Kind after following indirection layers
    pub fn resolved_kind(&self) -> Kind {
        self.data().resolve().kind()
    }

    /// Check whether writes through this handle are allowed
    pub fn is_writable(&self) -> bool {
        !matches!(self.slot, Slot::Shared(_))
    }

    pub fn is_nil(&self) -> bool {
        self.data().resolve().is_nil()
    }

    fn writable(&mut self, op: &'static str) -> crate::Result<&mut Data> {
        self.data_mut().ok_or(crate::ReflectError::cannot_set(op))
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mode = match self.slot {
            Slot::Owned(_) => "owned",
            Slot::Shared(_) => "shared",
            Slot::Exclusive(_) => "exclusive",
        };
        f.debug_struct("Value")
            .field("mode", &mode)
            .field("data", self.data())
            .finish()
    }
}

impl Display for Value<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.data(), f)
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data()
    }
}

impl Eq for Value<'_> {}

impl Hash for Value<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data().hash(state);
    }
}

impl From<Data> for Value<'static> {
    fn from(data: Data) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a Data> for Value<'a> {
    fn from(data: &'a Data) -> Self {
        Self::wrap(data)
    }
}

impl<'a> From<&'a mut Data> for Value<'a> {
    fn from(data: &'a mut Data) -> Self {
        Self::wrap_mut(data)
    }
}
