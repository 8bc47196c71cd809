//! Integer refitting and leveled numeric widening

use crate::complex::Complex;
use crate::data::Data;
use crate::error::{ReflectError, Result};
use crate::kind::{Family, Kind};

/// Any integer payload, widened to `i128`
pub(crate) fn integer(data: &Data) -> Option<i128> {
    Some(match *data {
        Data::Int(v) => v as i128,
        Data::Int8(v) => v.into(),
        Data::Int16(v) => v.into(),
        Data::Int32(v) => v.into(),
        Data::Int64(v) => v.into(),
        Data::Uint(v) => v as i128,
        Data::Uint8(v) => v.into(),
        Data::Uint16(v) => v.into(),
        Data::Uint32(v) => v.into(),
        Data::Uint64(v) => v.into(),
        _ => return None,
    })
}

fn float(data: &Data) -> Option<f64> {
    match *data {
        Data::Float32(v) => Some(v.into()),
        Data::Float64(v) => Some(v),
        _ => None,
    }
}

fn complex(data: &Data) -> Option<Complex<f64>> {
    match *data {
        Data::Complex64(c) => Some(c.into()),
        Data::Complex128(c) => Some(c),
        _ => None,
    }
}

/// Store an integer as `kind`, or `None` when it does not fit
fn integer_as(v: i128, kind: Kind) -> Option<Data> {
    Some(match kind {
        Kind::Int => Data::Int(v.try_into().ok()?),
        Kind::Int8 => Data::Int8(v.try_into().ok()?),
        Kind::Int16 => Data::Int16(v.try_into().ok()?),
        Kind::Int32 => Data::Int32(v.try_into().ok()?),
        Kind::Int64 => Data::Int64(v.try_into().ok()?),
        Kind::Uint => Data::Uint(v.try_into().ok()?),
        Kind::Uint8 => Data::Uint8(v.try_into().ok()?),
        Kind::Uint16 => Data::Uint16(v.try_into().ok()?),
        Kind::Uint32 => Data::Uint32(v.try_into().ok()?),
        Kind::Uint64 => Data::Uint64(v.try_into().ok()?),
        _ => return None,
    })
}

/// Move an integer payload to another integer kind without loss
pub(crate) fn refit_integer(data: &Data, kind: Kind) -> Option<Data> {
    integer_as(integer(data)?, kind)
}

/// Widen a numeric payload into `dst` of the same family
///
/// The source must belong to the destination's family and be no wider than
/// it; anything else is `TypeUnequal`.
pub(crate) fn widen(src: &Data, dst: Kind, op: &'static str) -> Result<Data> {
    let src_kind = src.kind();
    let unequal = || ReflectError::type_unequal(op, dst, src_kind);

    let family = dst.family().ok_or_else(unequal)?;
    if src_kind.family() != Some(family) || src_kind.level() > dst.level() {
        return Err(unequal());
    }

    match family {
        Family::Signed | Family::Unsigned => integer(src)
            .and_then(|v| integer_as(v, dst))
            .ok_or(ReflectError::overflow(op, dst)),
        Family::Float => {
            let v = float(src).ok_or_else(unequal)?;
            Ok(match dst {
                Kind::Float32 => Data::Float32(v as f32),
                _ => Data::Float64(v),
            })
        }
        Family::Complex => {
            let c = complex(src).ok_or_else(unequal)?;
            Ok(match dst {
                Kind::Complex64 => Data::Complex64(Complex::new(c.re as f32, c.im as f32)),
                _ => Data::Complex128(c),
            })
        }
    }
}
