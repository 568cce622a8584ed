//! Cursor configuration.

use csvfetch_encoding::NormalizerConfig;
use serde::{Deserialize, Serialize};

use crate::csv::Dialect;

/// Maximum input size accepted by default (500 MB).
pub const MAX_INPUT_SIZE: u64 = 500 * 1024 * 1024;

/// Immutable settings fixed when a cursor is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Candidate encodings for detection.
    pub normalizer: NormalizerConfig,

    /// Field separator and quote character.
    pub dialect: Dialect,

    /// Drop a leading UTF-8 BOM before staging.
    /// Defaults to true.
    pub strip_bom: bool,

    /// Largest raw input accepted, in bytes.
    /// Defaults to [`MAX_INPUT_SIZE`].
    pub max_input_bytes: u64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            dialect: Dialect::default(),
            strip_bom: true,
            max_input_bytes: MAX_INPUT_SIZE,
        }
    }
}

impl CursorConfig {
    /// Set the normalizer configuration.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Set the CSV dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable BOM stripping.
    #[must_use]
    pub fn with_strip_bom(mut self, enabled: bool) -> Self {
        self.strip_bom = enabled;
        self
    }

    /// Set the input size limit.
    #[must_use]
    pub fn with_max_input_bytes(mut self, max: u64) -> Self {
        self.max_input_bytes = max;
        self
    }
}
