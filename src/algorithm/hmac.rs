use crate::error::Rejection;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Verify HS256 signature with constant-time comparison
pub(crate) fn verify_hs256(
    secret: &[u8],
    signing_input: &[u8],
    signature: &[u8],
) -> Result<(), Rejection> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(|_| Rejection::SignatureInvalid)?;
    mac.update(signing_input);
    let expected_signature = mac.finalize().into_bytes();

    if signature.len() != expected_signature.len() {
        return Err(Rejection::SignatureInvalid);
    }

    if constant_time_eq(signature, &expected_signature) {
        Ok(())
    } else {
        Err(Rejection::SignatureInvalid)
    }
}
