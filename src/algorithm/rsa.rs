use crate::error::Rejection;

use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// Verify an RS256 signature
///
/// `public_key` is the PKCS#1 RSAPublicKey DER. The backend enforces the
/// 2048 to 8192-bit modulus range on every call.
pub(crate) fn verify_rs256(
    public_key: &[u8],
    signing_input: &[u8],
    signature: &[u8],
) -> Result<(), Rejection> {
    UnparsedPublicKey::new(&signature::RSA_PKCS1_2048_8192_SHA256, public_key)
        .verify(signing_input, signature)
        .map_err(|_| Rejection::SignatureInvalid)
}
