//! Recognized source encodings.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{EUC_JP, Encoding, ISO_2022_JP, SHIFT_JIS, UTF_8, UTF_8_INIT};
use serde::{Deserialize, Serialize};

/// Canonical encoding every normalized buffer is produced in.
///
/// Reported in detection logs; the output is UTF-8 because it is held as a
/// `String`.
pub static TARGET_ENCODING: &Encoding = &UTF_8_INIT;

/// Default candidate order used by [`crate::normalize`].
///
/// Order matters: ASCII text is also valid UTF-8, and many EUC-JP byte runs
/// are also valid Shift_JIS, so the narrower encoding is listed first.
pub const DEFAULT_CANDIDATES: [SourceEncoding; 5] = [
    SourceEncoding::Ascii,
    SourceEncoding::Iso2022Jp,
    SourceEncoding::Utf8,
    SourceEncoding::EucJp,
    SourceEncoding::ShiftJis,
];

/// An encoding the normalizer knows how to detect and convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceEncoding {
    /// 7-bit ASCII text.
    #[serde(rename = "ascii")]
    Ascii,
    /// 7-bit escape-shifted Japanese (JIS).
    #[serde(rename = "iso-2022-jp")]
    Iso2022Jp,
    /// UTF-8.
    #[serde(rename = "utf-8")]
    Utf8,
    /// 8-bit EUC-JP.
    #[serde(rename = "euc-jp")]
    EucJp,
    /// Double-byte Shift_JIS (Windows-31J flavour).
    #[serde(rename = "shift_jis")]
    ShiftJis,
}

impl SourceEncoding {
    /// Returns the label used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "US-ASCII",
            other => other.encoding().name(),
        }
    }

    /// Returns the `encoding_rs` codec that decodes this encoding.
    ///
    /// ASCII has no codec of its own; it is a strict subset of UTF-8.
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Self::Ascii | Self::Utf8 => UTF_8,
            Self::Iso2022Jp => ISO_2022_JP,
            Self::EucJp => EUC_JP,
            Self::ShiftJis => SHIFT_JIS,
        }
    }

    /// Decodes `raw` to UTF-8, or returns `None` if any byte sequence is
    /// malformed under this encoding.
    ///
    /// A leading BOM is kept as content.
    pub fn decode_strict(self, raw: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            Self::Ascii => {
                if raw.iter().copied().all(is_ascii_text_byte) {
                    std::str::from_utf8(raw).ok().map(Cow::Borrowed)
                } else {
                    None
                }
            }
            other => other
                .encoding()
                .decode_without_bom_handling_and_without_replacement(raw),
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Printable ASCII plus NUL, TAB, LF and CR.
///
/// ESC and the shift controls are excluded so JIS text falls through to the
/// ISO-2022-JP candidate.
fn is_ascii_text_byte(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7F | b'\t' | b'\n' | b'\r' | 0x00)
}
