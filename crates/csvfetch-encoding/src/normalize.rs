//! Detection and re-encoding to UTF-8.

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, Result};
use crate::source::{DEFAULT_CANDIDATES, SourceEncoding, TARGET_ENCODING};

/// Immutable normalizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Candidate encodings, tried in order.
    pub candidates: Vec<SourceEncoding>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.to_vec(),
        }
    }
}

impl NormalizerConfig {
    /// Replace the candidate list.
    #[must_use]
    pub fn with_candidates(
        mut self,
        candidates: impl IntoIterator<Item = SourceEncoding>,
    ) -> Self {
        self.candidates = candidates.into_iter().collect();
        self
    }

    fn candidate_names(&self) -> String {
        self.candidates
            .iter()
            .copied()
            .map(SourceEncoding::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// UTF-8 text derived from raw input, with the encoding it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBuffer {
    text: String,
    source: SourceEncoding,
}

impl NormalizedBuffer {
    /// The encoding the raw input was detected as.
    pub fn source_encoding(&self) -> SourceEncoding {
        self.source
    }

    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the normalized text as UTF-8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the buffer, returning the text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Consumes the buffer, returning the UTF-8 bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }
}

/// Returns the first candidate that accepts all of `raw`.
pub fn detect_encoding(raw: &[u8], candidates: &[SourceEncoding]) -> Option<SourceEncoding> {
    candidates
        .iter()
        .copied()
        .find(|candidate| candidate.decode_strict(raw).is_some())
}

/// Normalizes `raw` to UTF-8 using the default candidate order.
pub fn normalize(raw: &[u8]) -> Result<NormalizedBuffer> {
    normalize_with_config(raw, &NormalizerConfig::default())
}

/// Normalizes `raw` to UTF-8 using an explicit candidate order.
///
/// Detection and conversion share one strict decode per candidate, so the
/// returned text is exactly what the winning candidate accepted.
pub fn normalize_with_config(raw: &[u8], config: &NormalizerConfig) -> Result<NormalizedBuffer> {
    for &candidate in &config.candidates {
        if let Some(text) = candidate.decode_strict(raw) {
            tracing::debug!(
                encoding = %candidate,
                target = TARGET_ENCODING.name(),
                input_bytes = raw.len(),
                output_bytes = text.len(),
                "Detected source encoding"
            );
            return Ok(NormalizedBuffer {
                text: text.into_owned(),
                source: candidate,
            });
        }
    }

    let candidates = config.candidate_names();
    tracing::warn!(
        input_bytes = raw.len(),
        candidates = %candidates,
        "No candidate encoding accepts the input"
    );
    Err(EncodingError::Undetected {
        len: raw.len(),
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // "日本語" in each legacy encoding.
    const JIS: &[u8] = b"\x1b$BF|K\\8l\x1b(B";
    const EUC: &[u8] = &[0xC6, 0xFC, 0xCB, 0xDC, 0xB8, 0xEC];
    const SJIS: &[u8] = &[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];

    #[test]
    fn test_empty_input_is_ascii() {
        let buffer = normalize(b"").unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.source_encoding(), SourceEncoding::Ascii);
    }

    #[test]
    fn test_ascii_passthrough() {
        let buffer = normalize(b"a,b,c\n").unwrap();
        assert_eq!(buffer.source_encoding(), SourceEncoding::Ascii);
        assert_eq!(buffer.as_bytes(), b"a,b,c\n");
    }

    #[test]
    fn test_utf8_passthrough() {
        let text = "名前,年齢\n太郎,20\n";
        let buffer = normalize(text.as_bytes()).unwrap();
        assert_eq!(buffer.source_encoding(), SourceEncoding::Utf8);
        assert_eq!(buffer.as_str(), text);
    }

    #[test]
    fn test_detects_jis() {
        let buffer = normalize(JIS).unwrap();
        assert_eq!(buffer.source_encoding(), SourceEncoding::Iso2022Jp);
        assert_eq!(buffer.as_str(), "日本語");
    }

    #[test]
    fn test_detects_euc_jp() {
        let buffer = normalize(EUC).unwrap();
        assert_eq!(buffer.source_encoding(), SourceEncoding::EucJp);
        assert_eq!(buffer.into_string(), "日本語");
    }

    #[test]
    fn test_detects_shift_jis() {
        let buffer = normalize(SJIS).unwrap();
        assert_eq!(buffer.source_encoding(), SourceEncoding::ShiftJis);
        assert_eq!(buffer.into_bytes(), "日本語".as_bytes());
    }

    #[test]
    fn test_output_is_valid_target_encoding() {
        let buffer = normalize(EUC).unwrap();
        let decoded = TARGET_ENCODING
            .decode_without_bom_handling_and_without_replacement(buffer.as_bytes())
            .unwrap();
        assert_eq!(decoded, buffer.as_str());
    }

    #[test]
    fn test_undetected() {
        let err = normalize(b"abc\xFF").unwrap_err();
        assert_eq!(
            err,
            EncodingError::Undetected {
                len: 4,
                candidates: "US-ASCII, ISO-2022-JP, UTF-8, EUC-JP, Shift_JIS".to_string(),
            }
        );
    }

    #[test]
    fn test_candidate_order_decides() {
        let config = NormalizerConfig::default()
            .with_candidates([SourceEncoding::ShiftJis, SourceEncoding::EucJp]);
        // Plain ASCII is valid Shift_JIS, which now comes first.
        let buffer = normalize_with_config(b"abc", &config).unwrap();
        assert_eq!(buffer.source_encoding(), SourceEncoding::ShiftJis);
    }

    #[test]
    fn test_empty_candidate_list_rejects_everything() {
        let config = NormalizerConfig::default().with_candidates(Vec::new());
        assert!(normalize_with_config(b"", &config).is_err());
    }

    #[test]
    fn test_detect_encoding() {
        assert_eq!(
            detect_encoding(EUC, &DEFAULT_CANDIDATES),
            Some(SourceEncoding::EucJp)
        );
        assert_eq!(detect_encoding(b"\xFF", &DEFAULT_CANDIDATES), None);
        assert_eq!(detect_encoding(SJIS, &[SourceEncoding::Utf8]), None);
    }

    #[test]
    fn test_config_from_json() {
        let config: NormalizerConfig =
            serde_json::from_str(r#"{"candidates": ["utf-8", "shift_jis"]}"#).unwrap();
        assert_eq!(
            config.candidates,
            vec![SourceEncoding::Utf8, SourceEncoding::ShiftJis]
        );

        let defaulted: NormalizerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted, NormalizerConfig::default());
    }
}
