//! Field separator and quoting rules.

use serde::{Deserialize, Serialize};

/// The single delimiter/quote convention a cursor parses with.
///
/// A doubled quote inside a quoted field is a literal quote. A quote only
/// opens a quoted section at the start of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Field separator.
    pub delimiter: char,
    /// Quote character.
    pub quote: char,
}

impl Dialect {
    /// Comma-separated, double-quoted.
    pub const DEFAULT: Self = Self {
        delimiter: ',',
        quote: '"',
    };
}

impl Default for Dialect {
    fn default() -> Self {
        Self::DEFAULT
    }
}
