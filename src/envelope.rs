//! AutoProxy envelope decoding.
//!
//! Published lists are the rule text base64-encoded, usually wrapped at a
//! fixed line width. The decoded text must open with an `[AutoProxy x.y.z]`
//! header line.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::Engine;

use crate::{Error, Result};

/// Marker every decoded list starts with.
pub const MAGIC: &[u8] = b"[AutoProxy ";

/// Standard alphabet and padding, but non-zero bits in the final symbol are
/// ignored rather than rejected.
const ENVELOPE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode a base64 envelope into the raw rule text.
///
/// Line breaks and surrounding whitespace in the envelope are ignored; any
/// other whitespace is a decode error.
pub fn decode(raw: &[u8]) -> Result<Vec<u8>> {
    let compact: Vec<u8> = trim_ascii(raw)
        .iter()
        .copied()
        .filter(|&b| b != b'\r' && b != b'\n')
        .collect();

    let data = ENVELOPE.decode(trim_ascii(&compact))?;
    validate_header(&data)?;

    log::debug!(
        "Decoded AutoProxy envelope: {} bytes -> {} bytes",
        raw.len(),
        data.len()
    );
    Ok(data)
}

fn trim_ascii(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let end = data
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |idx| idx + 1);
    &data[start..end]
}

/// Encode rule text into an envelope. Inverse of [`decode`] for valid lists.
pub fn encode(text: &[u8]) -> String {
    STANDARD.encode(text)
}

/// Check the decoded text for the AutoProxy marker.
fn validate_header(data: &[u8]) -> Result<()> {
    if !data.starts_with(MAGIC) {
        return Err(Error::InvalidHeader);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "[AutoProxy 0.2.9]\n||google.com\n";

    #[test]
    fn test_decode_valid() {
        let raw = encode(LIST.as_bytes());
        let data = decode(raw.as_bytes()).unwrap();
        assert_eq!(data, LIST.as_bytes());
    }

    #[test]
    fn test_decode_wrapped_lines() {
        let raw = encode(LIST.as_bytes());
        let wrapped: String = raw
            .as_bytes()
            .chunks(8)
            .map(|c| format!("{}\r\n", std::str::from_utf8(c).unwrap()))
            .collect();
        let data = decode(wrapped.as_bytes()).unwrap();
        assert_eq!(data, LIST.as_bytes());
    }

    #[test]
    fn test_decode_invalid_alphabet() {
        let err = decode(b"W0F1dG9Qcm94eSAw$$$").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_invalid_padding() {
        let err = decode(b"W0F1dG9Qcm94eSAw=").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_ignores_trailing_bits() {
        let text = "[AutoProxy 0.2.9]\nab";
        let raw = encode(text.as_bytes());
        assert!(raw.ends_with("YWI="));
        let raw = raw.replace("YWI=", "YWJ=");

        let data = decode(raw.as_bytes()).unwrap();
        assert_eq!(data, text.as_bytes());
    }

    #[test]
    fn test_decode_surrounding_whitespace() {
        let raw = format!("  \t{}\n\n ", encode(LIST.as_bytes()));
        assert_eq!(decode(raw.as_bytes()).unwrap(), LIST.as_bytes());
    }

    #[test]
    fn test_decode_rejects_inner_spaces() {
        let raw = encode(LIST.as_bytes());
        let (head, tail) = raw.split_at(8);
        let spaced = format!("{} \t{}", head, tail);
        let err = decode(spaced.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_missing_header() {
        let raw = encode(b"[Adblock Plus 2.0]\n||google.com\n");
        let err = decode(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader));
    }

    #[test]
    fn test_empty_envelope() {
        let err = decode(b"").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader));
    }
}
