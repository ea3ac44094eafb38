use crate::error::Rejection;

use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// Verify an ES512 signature
///
/// `public_key` is the uncompressed P-521 point. JWS ECDSA signatures use the
/// fixed-length `R || S` form (RFC 7518 Section 3.4), not ASN.1 DER.
pub(crate) fn verify_es512(
    public_key: &[u8],
    signing_input: &[u8],
    signature: &[u8],
) -> Result<(), Rejection> {
    UnparsedPublicKey::new(&signature::ECDSA_P521_SHA512_FIXED, public_key)
        .verify(signing_input, signature)
        .map_err(|_| Rejection::SignatureInvalid)
}
