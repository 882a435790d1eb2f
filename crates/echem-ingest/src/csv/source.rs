//! In-memory copy of an instrument file.

use std::io::Read;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{IngestError, Result};

/// Decoded text of an input stream, read once and never modified.
///
/// Every view a loader offers (header, column names, table, schema) is
/// derived from this buffer on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    text: String,
}

impl RawFile {
    /// Reads `reader` to the end and decodes it.
    ///
    /// A byte-order mark selects the encoding and is stripped. Without one,
    /// valid UTF-8 is taken as is; anything else is decoded with `fallback`,
    /// or rejected when there is no fallback.
    pub fn read<R: Read>(mut reader: R, fallback: Option<&'static Encoding>) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| IngestError::Read { source })?;
        Self::decode(&bytes, fallback)
    }

    /// Decodes raw bytes (see [`RawFile::read`]).
    pub fn decode(bytes: &[u8], fallback: Option<&'static Encoding>) -> Result<Self> {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            if had_errors {
                return Err(IngestError::Encoding {
                    encoding: encoding.name(),
                });
            }
            return Ok(Self::from_text(text.into_owned()));
        }

        if let Ok(text) = std::str::from_utf8(bytes) {
            return Ok(Self::from_text(text.to_string()));
        }

        match fallback {
            Some(encoding) if encoding != UTF_8 => {
                tracing::debug!(
                    encoding = encoding.name(),
                    "Input is not UTF-8, decoding with fallback encoding"
                );
                let (text, _) = encoding.decode_without_bom_handling(bytes);
                Ok(Self::from_text(text.into_owned()))
            }
            _ => Err(IngestError::Encoding {
                encoding: UTF_8.name(),
            }),
        }
    }

    /// Wraps text that is already decoded.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the decoded text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates over lines without their terminators.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }

    /// Returns true if the file holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1252;

    #[test]
    fn test_reads_utf8() {
        let raw = RawFile::read("a,b\n0,0".as_bytes(), None).unwrap();
        assert_eq!(raw.text(), "a,b\n0,0");
        assert_eq!(raw.lines().count(), 2);
    }

    #[test]
    fn test_strips_utf8_bom() {
        let raw = RawFile::decode(b"\xEF\xBB\xBFa,b\n", None).unwrap();
        assert_eq!(raw.text(), "a,b\n");
    }

    #[test]
    fn test_latin1_needs_fallback() {
        // "Capacitance/µF" with µ encoded as a single latin-1 byte
        let bytes = b"Capacitance/\xB5F\n";

        let err = RawFile::decode(bytes, None).unwrap_err();
        assert!(matches!(err, IngestError::Encoding { .. }));

        let raw = RawFile::decode(bytes, Some(WINDOWS_1252)).unwrap();
        assert_eq!(raw.text(), "Capacitance/\u{b5}F\n");
    }

    #[test]
    fn test_blank_input() {
        assert!(RawFile::from_text(" \n\n").is_blank());
        assert!(!RawFile::from_text("a").is_blank());
    }
}
