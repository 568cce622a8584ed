//! Character encoding detection and normalization.
//!
//! Raw bytes of unknown origin are checked against a fixed, ordered list of
//! candidate encodings. The first candidate under which the entire input is
//! well-formed wins and the bytes are re-encoded to UTF-8. Detection is
//! strict: a candidate is rejected as soon as a single byte sequence is
//! malformed, so no replacement characters ever reach the output.
//!
//! # Example
//!
//! ```
//! use csvfetch_encoding::{SourceEncoding, normalize};
//!
//! // "日本語" in EUC-JP
//! let raw = [0xC6, 0xFC, 0xCB, 0xDC, 0xB8, 0xEC];
//! let buffer = normalize(&raw).unwrap();
//!
//! assert_eq!(buffer.source_encoding(), SourceEncoding::EucJp);
//! assert_eq!(buffer.as_str(), "日本語");
//! ```

mod error;
mod normalize;
mod source;

// === Error Types ===
pub use error::{EncodingError, Result};

// === Encodings ===
pub use source::{DEFAULT_CANDIDATES, SourceEncoding, TARGET_ENCODING};

// === Normalization ===
pub use normalize::{
    NormalizedBuffer, NormalizerConfig, detect_encoding, normalize, normalize_with_config,
};
