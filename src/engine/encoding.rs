// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Input text decoding.
//!
//! Input files arrive in whatever encoding the producing system used, so the
//! raw bytes are sniffed with a confidence-based detector before decoding.
//! Output is always UTF-8 regardless of what was detected.

use chardetng::EncodingDetector;

/// Detect the encoding of `raw` and decode the whole buffer to a UTF-8 string.
///
/// Returns `None` when the best guess cannot represent the byte stream
/// without malformed sequences; the caller treats that as an undetectable
/// encoding.  Byte-order marks are honoured and stripped by the decoder.
pub fn decode_text(raw: &[u8]) -> Option<String> {
    let mut detector = EncodingDetector::new();
    detector.feed(raw, true);
    let encoding = detector.guess(None, true);

    let (text, _, had_errors) = encoding.decode(raw);
    if had_errors {
        return None;
    }
    Some(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_input_decodes_unchanged() {
        let text = "naïve café résumé";
        assert_eq!(decode_text(text.as_bytes()), Some(text.to_string()));
    }

    #[test]
    fn plain_ascii_decodes_unchanged() {
        assert_eq!(
            decode_text(b"just ascii text"),
            Some("just ascii text".to_string())
        );
    }

    #[test]
    fn legacy_western_bytes_are_sniffed() {
        // "Les invités sont arrivés à l'heure." in windows-1252.
        let raw = b"Les invit\xe9s sont arriv\xe9s \xe0 l'heure.";
        assert_eq!(
            decode_text(raw),
            Some("Les invités sont arrivés à l'heure.".to_string())
        );
    }

    #[test]
    fn empty_input_decodes_to_empty_string() {
        assert_eq!(decode_text(b""), Some(String::new()));
    }
}
