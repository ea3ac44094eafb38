//! Base64URL decoding per RFC 4648
//!
//! Signature and claim checks read the header and payload through a lenient
//! decoder: characters outside the Base64URL alphabet (padding included) are
//! skipped and non-canonical trailing bits are ignored. The signature always
//! covers the raw segment text, so skipped characters are still
//! authenticated. The final decode step that produces the caller's text only
//! accepts canonical unpadded Base64URL as required by RFC 7515.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

fn decode_with(
    engine: &GeneralPurpose,
    input: &str,
    max_size: usize,
) -> std::result::Result<Vec<u8>, String> {
    let result = engine.decode(input).map_err(|e| e.to_string())?;

    // Validate decoded size to prevent DoS attacks
    if result.len() > max_size {
        return Err(format!(
            "decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        ));
    }

    Ok(result)
}

/// Decode Base64URL, skipping characters outside the alphabet
pub(crate) fn decode_lenient(input: &str, max_size: usize) -> std::result::Result<Vec<u8>, String> {
    if input.bytes().all(is_url_safe) {
        return decode_with(&URL_SAFE_LENIENT, input, max_size);
    }
    let filtered: String = input
        .chars()
        .filter(|c| c.is_ascii() && is_url_safe(*c as u8))
        .collect();
    decode_with(&URL_SAFE_LENIENT, &filtered, max_size)
}

fn is_url_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Decode canonical unpadded Base64URL
pub(crate) fn decode_strict(input: &str, max_size: usize) -> std::result::Result<Vec<u8>, String> {
    decode_with(&URL_SAFE_NO_PAD, input, max_size)
}

/// Decode canonical unpadded Base64URL into UTF-8 text
pub(crate) fn decode_text_strict(
    input: &str,
    max_size: usize,
) -> std::result::Result<String, String> {
    decode_strict(input, max_size)
        .and_then(|bytes| String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {e}")))
}
