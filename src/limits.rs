//! Size limit constants for input validation

/// Maximum length for a token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// An 8192-bit RSA signature is exactly 1024 bytes
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for the Base64URL-encoded signature string (1.5KB)
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

/// Maximum length for the key ID (kid) header field
pub(crate) const MAX_KID_LENGTH: usize = 256;

/// Maximum length for the algorithm (alg) header field
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum size of a certificate file read from disk (64KB)
pub(crate) const MAX_CERT_FILE_SIZE: u64 = 64 * 1024;

/// Minimum valid Unix timestamp (1970-01-01 00:00:00 UTC)
pub(crate) const MIN_TIMESTAMP: i64 = 0;

/// Maximum valid Unix timestamp (2100-01-01 00:00:00 UTC)
pub(crate) const MAX_TIMESTAMP: i64 = 4_102_444_800;

/// Maximum leeway applied to time claims (5 minutes)
pub(crate) const MAX_LEEWAY_SECONDS: u64 = 300;

/// RSA modulus bounds accepted by the verification backend
pub(crate) const MIN_RSA_MODULUS_BITS: usize = 2048;
pub(crate) const MAX_RSA_MODULUS_BITS: usize = 8192;

/// HMAC secrets shorter than the SHA-256 output are accepted with a warning
pub(crate) const RECOMMENDED_HMAC_SECRET_LENGTH: usize = 32;
