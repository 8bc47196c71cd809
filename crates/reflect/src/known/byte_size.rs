//! Byte-size quantities (`512B`, `4KiB`, `1.5 MB`)

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A quantity of bytes
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ByteSize(pub u64);

const BINARY_UNITS: [(&str, u64); 5] = [
    ("PiB", 1 << 50),
    ("TiB", 1 << 40),
    ("GiB", 1 << 30),
    ("MiB", 1 << 20),
    ("KiB", 1 << 10),
];

impl ByteSize {
    pub const fn b(n: u64) -> Self {
        Self(n)
    }

    pub const fn kib(n: u64) -> Self {
        Self(n << 10)
    }

    pub const fn mib(n: u64) -> Self {
        Self(n << 20)
    }

    pub const fn gib(n: u64) -> Self {
        Self(n << 30)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Parse a number with an optional decimal (`KB`) or binary (`KiB`) unit
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let fail = |reason| ParseError::ByteSize {
            input: input.to_owned(),
            reason,
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(fail("empty input"));
        }
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);
        if number.is_empty() {
            return Err(fail("missing number"));
        }
        let multiplier = unit_multiplier(unit.trim()).ok_or_else(|| fail("unknown unit"))?;

        if number.contains('.') {
            let value: f64 = number.parse().map_err(|_| fail("invalid number"))?;
            let bytes = (value * multiplier as f64).round();
            if !bytes.is_finite() || bytes > u64::MAX as f64 {
                return Err(fail("overflow"));
            }
            Ok(Self(bytes as u64))
        } else {
            let value: u64 = number.parse().map_err(|_| fail("overflow"))?;
            value
                .checked_mul(multiplier)
                .map(Self)
                .ok_or_else(|| fail("overflow"))
        }
    }
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    let multiplier = match unit.to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "kb" | "k" => 1_000,
        "mb" | "m" => 1_000_000,
        "gb" | "g" => 1_000_000_000,
        "tb" | "t" => 1_000_000_000_000,
        "pb" | "p" => 1_000_000_000_000_000,
        "kib" => 1 << 10,
        "mib" => 1 << 20,
        "gib" => 1 << 30,
        "tib" => 1 << 40,
        "pib" => 1 << 50,
        _ => return None,
    };
    Some(multiplier)
}

impl Display for ByteSize {
    /// Renders with the largest binary unit that divides the size exactly
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0 != 0 {
            for (unit, size) in BINARY_UNITS {
                if self.0 % size == 0 {
                    return write!(f, "{}{unit}", self.0 / size);
                }
            }
        }
        write!(f, "{}B", self.0)
    }
}

impl FromStr for ByteSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for ByteSize {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("512", 512)]
    #[case("512B", 512)]
    #[case("4KiB", 4096)]
    #[case("4 kib", 4096)]
    #[case("1KB", 1000)]
    #[case("1.5 MB", 1_500_000)]
    #[case("0.5KiB", 512)]
    #[case("2GiB", 2 << 30)]
    fn test_parse(#[case] input: &str, #[case] bytes: u64) {
        assert_eq!(ByteSize::parse(input).unwrap(), ByteSize(bytes));
    }

    #[rstest]
    #[case("")]
    #[case("KiB")]
    #[case("12 parsecs")]
    #[case("1.2.3KB")]
    #[case("99999999999999999999")]
    #[case("20000PiB")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(ByteSize::parse(input).is_err());
    }

    #[rstest]
    #[case(ByteSize(0), "0B")]
    #[case(ByteSize(512), "512B")]
    #[case(ByteSize::kib(4), "4KiB")]
    #[case(ByteSize(1536), "1536B")]
    #[case(ByteSize::mib(3), "3MiB")]
    fn test_display(#[case] size: ByteSize, #[case] text: &str) {
        assert_eq!(size.to_string(), text);
        assert_eq!(text.parse::<ByteSize>().unwrap(), size);
    }
}
