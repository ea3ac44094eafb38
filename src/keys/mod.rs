//! Key material for token verification
//!
//! A [`Verifier`](crate::Verifier) owns exactly one [`KeyMaterial`]:
//! - a shared [`Secret`] for HS256
//! - a [`PublicKey`] for RS256 or ES512
//! - a [`KeyProvider`] callback that resolves a public key per token
//!
//! Public keys are normalized to SubjectPublicKeyInfo DER and classified
//! (key kind, RSA modulus size, EC curve) when they are built, so a key that
//! cannot be used never reaches `verify`.

use crate::algorithm::Algorithm;
use crate::error::{Error, ErrorKind, Result};
use crate::limits::{MAX_RSA_MODULUS_BITS, MIN_RSA_MODULUS_BITS};
use crate::utils::der::{self, KeyShape, SECP256R1_OID, SECP384R1_OID, SECP521R1_OID};
use spki::ObjectIdentifier;
use std::collections::HashMap;
use std::sync::Arc;

/// Public key algorithm family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Rsa,
    Ec,
}

impl KeyKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Rsa => "RSA",
            KeyKind::Ec => "EC",
        }
    }
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named elliptic curves recognized in EC public keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256 (secp256r1)
    P256,
    /// NIST P-384 (secp384r1)
    P384,
    /// NIST P-521 (secp521r1), the only curve ES512 accepts
    P521,
}

impl EcCurve {
    pub const fn name(&self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    pub(crate) const fn oid(&self) -> ObjectIdentifier {
        match self {
            EcCurve::P256 => SECP256R1_OID,
            EcCurve::P384 => SECP384R1_OID,
            EcCurve::P521 => SECP521R1_OID,
        }
    }

    pub(crate) fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        [EcCurve::P256, EcCurve::P384, EcCurve::P521]
            .into_iter()
            .find(|curve| curve.oid() == *oid)
    }

    /// Length of the uncompressed point encoding (0x04 || X || Y)
    pub(crate) const fn uncompressed_point_len(&self) -> usize {
        match self {
            EcCurve::P256 => 65,
            EcCurve::P384 => 97,
            EcCurve::P521 => 133,
        }
    }
}

impl std::fmt::Display for EcCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared secret for HMAC algorithms
///
/// The `Debug` output never contains the secret bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.0.len())
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&[u8]> for Secret {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// Classified public key for RS256 or ES512
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    shape: KeyShape,
    spki_der: Vec<u8>,
    key_bits: Vec<u8>,
}

impl PublicKey {
    /// RSA key from SubjectPublicKeyInfo DER
    pub fn rsa_der(spki_der: &[u8]) -> Result<Self> {
        Self::from_spki(spki_der)
            .and_then(|key| key.require_rsa())
            .map_err(|e| Error::new(ErrorKind::Rsa256, e))
    }

    /// RSA key from a `-----BEGIN PUBLIC KEY-----` PEM document
    pub fn rsa_pem(pem: &str) -> Result<Self> {
        der::spki_der_from_pem(pem)
            .and_then(|spki| Self::from_spki(&spki))
            .and_then(|key| key.require_rsa())
            .map_err(|e| Error::new(ErrorKind::Rsa256, e))
    }

    /// RSA key from a PKCS#1 RSAPublicKey DER document
    pub fn rsa_pkcs1_der(pkcs1_der: &[u8]) -> Result<Self> {
        der::rsa_spki_from_pkcs1(pkcs1_der)
            .and_then(|spki| Self::from_spki(&spki))
            .and_then(|key| key.require_rsa())
            .map_err(|e| Error::new(ErrorKind::Rsa256, e))
    }

    /// RSA key from big-endian modulus and public exponent bytes
    pub fn rsa_components(modulus: &[u8], exponent: &[u8]) -> Result<Self> {
        der::rsa_spki_from_n_e(modulus, exponent)
            .and_then(|spki| Self::from_spki(&spki))
            .and_then(|key| key.require_rsa())
            .map_err(|e| Error::new(ErrorKind::Rsa256, e))
    }

    /// EC key from SubjectPublicKeyInfo DER
    pub fn ec_der(spki_der: &[u8]) -> Result<Self> {
        Self::from_spki(spki_der)
            .and_then(|key| key.require_kind(KeyKind::Ec))
            .map_err(|e| Error::new(ErrorKind::Ecdsa512, e))
    }

    /// EC key from a `-----BEGIN PUBLIC KEY-----` PEM document
    pub fn ec_pem(pem: &str) -> Result<Self> {
        der::spki_der_from_pem(pem)
            .and_then(|spki| Self::from_spki(&spki))
            .and_then(|key| key.require_kind(KeyKind::Ec))
            .map_err(|e| Error::new(ErrorKind::Ecdsa512, e))
    }

    /// EC key from an uncompressed point on the given curve
    pub fn ec_point(curve: EcCurve, point: &[u8]) -> Result<Self> {
        der::ec_spki_from_point(curve, point)
            .and_then(|spki| Self::from_spki(&spki))
            .map_err(|e| Error::new(ErrorKind::Ecdsa512, e))
    }

    /// Parse and classify SPKI DER without committing to a key kind
    pub(crate) fn from_spki(spki_der: &[u8]) -> std::result::Result<Self, String> {
        let parsed = der::parse_spki(spki_der)?;
        Ok(Self {
            shape: parsed.shape,
            spki_der: spki_der.to_vec(),
            key_bits: parsed.key_bits,
        })
    }

    fn require_kind(self, kind: KeyKind) -> std::result::Result<Self, String> {
        if self.kind() != kind {
            return Err(format!("expected {kind} public key, found {}", self.kind()));
        }
        Ok(self)
    }

    fn require_rsa(self) -> std::result::Result<Self, String> {
        let key = self.require_kind(KeyKind::Rsa)?;
        if let Some(bits) = key.modulus_bits() {
            check_rsa_modulus(bits)?;
        }
        Ok(key)
    }

    pub fn kind(&self) -> KeyKind {
        match self.shape {
            KeyShape::Rsa { .. } => KeyKind::Rsa,
            KeyShape::Ec { .. } => KeyKind::Ec,
        }
    }

    /// EC curve, `None` for RSA keys
    pub fn curve(&self) -> Option<EcCurve> {
        match self.shape {
            KeyShape::Ec { curve } => Some(curve),
            KeyShape::Rsa { .. } => None,
        }
    }

    /// RSA modulus size in bits, `None` for EC keys
    pub fn modulus_bits(&self) -> Option<usize> {
        match self.shape {
            KeyShape::Rsa { modulus_bits } => Some(modulus_bits),
            KeyShape::Ec { .. } => None,
        }
    }

    /// The normalized SubjectPublicKeyInfo DER encoding
    pub fn spki_der(&self) -> &[u8] {
        &self.spki_der
    }

    /// PKCS#1 RSAPublicKey (RSA) or uncompressed point (EC)
    pub(crate) fn key_bits(&self) -> &[u8] {
        &self.key_bits
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("PublicKey");
        s.field("kind", &self.kind());
        match self.shape {
            KeyShape::Rsa { modulus_bits } => s.field("modulus_bits", &modulus_bits),
            KeyShape::Ec { curve } => s.field("curve", &curve),
        };
        s.finish()
    }
}

pub(crate) fn check_rsa_modulus(bits: usize) -> std::result::Result<(), String> {
    if !(MIN_RSA_MODULUS_BITS..=MAX_RSA_MODULUS_BITS).contains(&bits) {
        return Err(format!(
            "RSA modulus of {bits} bits outside accepted range ({MIN_RSA_MODULUS_BITS} to {MAX_RSA_MODULUS_BITS} bits)"
        ));
    }
    Ok(())
}

/// Token metadata handed to a [`KeyProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLookup<'a> {
    /// The header `kid`, if the token carries one
    pub key_id: Option<&'a str>,
    /// The algorithm the verifier is configured for
    pub algorithm: Algorithm,
}

type ResolveFn = dyn for<'a> Fn(&KeyLookup<'a>) -> Option<PublicKey> + Send + Sync;

/// Callback that resolves the verification key for a token
///
/// Used for key rotation: the provider sees the token's `kid` and returns the
/// matching public key, or `None` when it has none.
#[derive(Clone)]
pub struct KeyProvider(Arc<ResolveFn>);

impl KeyProvider {
    pub fn new<F>(resolve: F) -> Self
    where
        F: for<'a> Fn(&KeyLookup<'a>) -> Option<PublicKey> + Send + Sync + 'static,
    {
        Self(Arc::new(resolve))
    }

    /// Provider backed by a fixed `kid` to key map
    ///
    /// Tokens without a `kid` or with an unknown one resolve to no key.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = (K, PublicKey)>,
        K: Into<String>,
    {
        let keys: HashMap<String, PublicKey> =
            keys.into_iter().map(|(kid, key)| (kid.into(), key)).collect();
        Self::new(move |lookup| lookup.key_id.and_then(|kid| keys.get(kid).cloned()))
    }

    pub fn resolve(&self, lookup: &KeyLookup<'_>) -> Option<PublicKey> {
        (self.0)(lookup)
    }
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyProvider(..)")
    }
}

/// The key a verifier checks signatures with
#[derive(Debug, Clone)]
pub enum KeyMaterial {
    Secret(Secret),
    PublicKey(PublicKey),
    KeyProvider(KeyProvider),
}

impl KeyMaterial {
    /// Short description for logs; never includes key bytes
    pub(crate) fn source(&self) -> &'static str {
        match self {
            KeyMaterial::Secret(_) => "secret",
            KeyMaterial::PublicKey(_) => "public_key",
            KeyMaterial::KeyProvider(_) => "key_provider",
        }
    }
}
