//! Signature algorithms
//!
//! Exactly three JWS algorithms are supported, one per verifier family.
//! The header `alg` of every token must name the verifier's configured
//! algorithm; anything else, `none` included, is rejected before a key is
//! touched.

pub(crate) mod ecdsa;
pub(crate) mod hmac;
pub(crate) mod rsa;

use crate::error::{ErrorKind, Rejection};
use crate::keys::{self, EcCurve, KeyKind, PublicKey};

/// JWS algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC with SHA-256
    HS256,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// ECDSA with P-521 and SHA-512
    ES512,
}

impl Algorithm {
    /// Parse the header `alg` value
    pub(crate) fn from_header(alg: &str) -> Result<Self, Rejection> {
        match alg {
            "none" => Err(Rejection::AlgorithmNone),
            "HS256" => Ok(Algorithm::HS256),
            "RS256" => Ok(Algorithm::RS256),
            "ES512" => Ok(Algorithm::ES512),
            _ => Err(Rejection::AlgorithmUnsupported(alg.into())),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::RS256 => "RS256",
            Algorithm::ES512 => "ES512",
        }
    }

    /// Public key kind the algorithm verifies with, `None` for HMAC
    pub const fn key_kind(&self) -> Option<KeyKind> {
        match self {
            Algorithm::HS256 => None,
            Algorithm::RS256 => Some(KeyKind::Rsa),
            Algorithm::ES512 => Some(KeyKind::Ec),
        }
    }

    /// Tag for errors raised while building a verifier of this family
    pub(crate) const fn error_kind(&self) -> ErrorKind {
        match self {
            Algorithm::HS256 => ErrorKind::Hmac256,
            Algorithm::RS256 => ErrorKind::Rsa256,
            Algorithm::ES512 => ErrorKind::Ecdsa512,
        }
    }

    /// Check that a public key can verify signatures of this algorithm
    pub(crate) fn check_key(&self, key: &PublicKey) -> Result<(), String> {
        let Some(expected) = self.key_kind() else {
            return Err(format!(
                "{self} verifies with a shared secret, not a public key"
            ));
        };

        if key.kind() != expected {
            return Err(format!(
                "{self} requires an {expected} public key, found {}",
                key.kind()
            ));
        }

        if let Some(bits) = key.modulus_bits() {
            keys::check_rsa_modulus(bits)?;
        }

        if *self == Algorithm::ES512 && key.curve() != Some(EcCurve::P521) {
            let found = key.curve().map(|c| c.name()).unwrap_or("unknown curve");
            return Err(format!("{self} requires a P-521 key, found {found}"));
        }

        Ok(())
    }

    /// Verify `signature` over `signing_input` (the ASCII `header.payload`)
    pub(crate) fn verify_signature(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: VerificationKey<'_>,
    ) -> Result<(), Rejection> {
        match (self, key) {
            (Algorithm::HS256, VerificationKey::Secret(secret)) => {
                hmac::verify_hs256(secret, signing_input, signature)
            }
            (Algorithm::RS256, VerificationKey::Public(public)) => {
                rsa::verify_rs256(public.key_bits(), signing_input, signature)
            }
            (Algorithm::ES512, VerificationKey::Public(public)) => {
                ecdsa::verify_es512(public.key_bits(), signing_input, signature)
            }
            _ => Err(Rejection::KeyRejected(format!(
                "key material does not match {self}"
            ))),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Borrowed key handed to the signature check
#[derive(Clone, Copy)]
pub(crate) enum VerificationKey<'a> {
    Secret(&'a [u8]),
    Public(&'a PublicKey),
}
