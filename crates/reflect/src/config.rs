//! Conversion configuration
//!
//! ```
//! use nebula_reflect::ConvConfig;
//!
//! let config = ConvConfig::default();
//! assert_eq!(config.max_depth, 128);
//!
//! let strict = ConvConfig::strict().with_max_depth(8);
//! assert_eq!(strict.max_depth, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Layout tried for timestamps after RFC 3339 fails
///
/// Matches text such as `Fri Nov 1 19:13:55 +0800 CST 2019`; the zone
/// abbreviation is skipped and the numeric offset is authoritative.
pub const DEFAULT_TIME_LAYOUT: &str = "%a %b %e %H:%M:%S %z %Z %Y";

/// Settings applied by a [`Converter`](crate::Converter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvConfig {
    /// chrono format string for the timestamp fallback parser
    pub time_layout: String,

    /// Maximum nesting depth of a single conversion
    pub max_depth: usize,
}

impl Default for ConvConfig {
    fn default() -> Self {
        Self {
            time_layout: DEFAULT_TIME_LAYOUT.to_owned(),
            max_depth: 128,
        }
    }
}

impl ConvConfig {
    /// Shallow limits for untrusted input
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            ..Self::default()
        }
    }

    /// Deep limits for trusted, machine-generated trees
    pub fn permissive() -> Self {
        Self {
            max_depth: 1024,
            ..Self::default()
        }
    }

    pub fn with_time_layout(mut self, layout: impl Into<String>) -> Self {
        self.time_layout = layout.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
