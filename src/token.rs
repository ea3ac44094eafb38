use crate::error::Rejection;
use crate::limits::{MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH};

/// Header and payload of a verified token
///
/// Both fields always hold the same representation: either both are still
/// Base64URL segments or both are decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedToken<T> {
    pub header: T,
    pub payload: T,
}

impl<T> DecodedToken<T> {
    pub fn new(header: T, payload: T) -> Self {
        Self { header, payload }
    }

    /// Transform both fields, or neither
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<DecodedToken<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let header = f(self.header)?;
        let payload = f(self.payload)?;
        Ok(DecodedToken { header, payload })
    }

    pub fn into_parts(self) -> (T, T) {
        (self.header, self.payload)
    }
}

/// The three segments of a compact-serialized token
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenParts<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
    signing_input: &'a str,
}

impl<'a> TokenParts<'a> {
    pub(crate) fn split(token: &'a str) -> Result<Self, Rejection> {
        // Validate token string length
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Rejection::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let header = parts.next().ok_or(Rejection::FormatInvalid)?;
        let payload = parts.next().ok_or(Rejection::FormatInvalid)?;
        let signature = parts.next().ok_or(Rejection::FormatInvalid)?;
        if parts.next().is_some() || header.is_empty() || signature.is_empty() {
            return Err(Rejection::FormatInvalid);
        }

        // Validate signature Base64URL size before decoding
        if signature.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Rejection::SignatureTooLarge {
                size: signature.len(),
                max: MAX_SIGNATURE_B64_SIZE,
            });
        }

        let signing_input = &token[..header.len() + 1 + payload.len()];

        Ok(Self {
            header,
            payload,
            signature,
            signing_input,
        })
    }

    /// `header.payload`, the bytes covered by the signature
    pub(crate) fn signing_input(&self) -> &'a [u8] {
        self.signing_input.as_bytes()
    }
}
