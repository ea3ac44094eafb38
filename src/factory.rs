//! Verifier factories
//!
//! One constructor per algorithm family. Each returns a ready [`Verifier`] or
//! an error tagged with its family (`hmac256`, `rsa256`, `ecdsa512`).
//! Certificate-file variants fail with `fromCertFile` before any key-based
//! construction is attempted.

use crate::algorithm::Algorithm;
use crate::cert;
use crate::error::{Error, Result};
use crate::keys::{KeyMaterial, KeyProvider, PublicKey, Secret};
use crate::limits::RECOMMENDED_HMAC_SECRET_LENGTH;
use crate::verifier::Verifier;
use std::path::Path;
use tracing::{debug, warn};

impl Verifier {
    /// HS256 verifier for a shared secret
    ///
    /// ```
    /// use jwtguard::Verifier;
    ///
    /// let verifier = Verifier::hmac256("s3cr3t").unwrap();
    /// assert_eq!(verifier.algorithm().as_str(), "HS256");
    /// ```
    pub fn hmac256(secret: impl Into<Secret>) -> Result<Self> {
        Self::from_key_material(Algorithm::HS256, KeyMaterial::Secret(secret.into()))
    }

    /// RS256 verifier for a fixed public key
    pub fn rsa256(key: PublicKey) -> Result<Self> {
        Self::from_key_material(Algorithm::RS256, KeyMaterial::PublicKey(key))
    }

    /// RS256 verifier resolving keys per token, e.g. by `kid`
    pub fn rsa256_with_provider(provider: KeyProvider) -> Result<Self> {
        Self::from_key_material(Algorithm::RS256, KeyMaterial::KeyProvider(provider))
    }

    /// RS256 verifier for the RSA key of an X.509 certificate (PEM or DER)
    pub fn rsa256_from_cert_file(path: impl AsRef<Path>) -> Result<Self> {
        let key = cert::load_public_key(path.as_ref(), Algorithm::RS256)?;
        Self::rsa256(key)
    }

    /// ES512 verifier for a fixed P-521 public key
    pub fn ecdsa512(key: PublicKey) -> Result<Self> {
        Self::from_key_material(Algorithm::ES512, KeyMaterial::PublicKey(key))
    }

    /// ES512 verifier resolving keys per token, e.g. by `kid`
    pub fn ecdsa512_with_provider(provider: KeyProvider) -> Result<Self> {
        Self::from_key_material(Algorithm::ES512, KeyMaterial::KeyProvider(provider))
    }

    /// ES512 verifier for the P-521 key of an X.509 certificate (PEM or DER)
    pub fn ecdsa512_from_cert_file(path: impl AsRef<Path>) -> Result<Self> {
        let key = cert::load_public_key(path.as_ref(), Algorithm::ES512)?;
        Self::ecdsa512(key)
    }

    /// Verifier for any supported algorithm and matching key material
    ///
    /// A secret is only valid for HS256 and a public key or provider only for
    /// RS256 and ES512. Errors carry the requested algorithm's tag.
    pub fn from_key_material(algorithm: Algorithm, key: KeyMaterial) -> Result<Self> {
        let fail = |message: String| Error::new(algorithm.error_kind(), message);

        match (&key, algorithm.key_kind()) {
            (KeyMaterial::Secret(secret), None) => {
                if secret.is_empty() {
                    return Err(fail("HMAC secret must not be empty".to_string()));
                }
                if secret.len() < RECOMMENDED_HMAC_SECRET_LENGTH {
                    warn!(
                        algorithm = %algorithm,
                        length = secret.len(),
                        recommended = RECOMMENDED_HMAC_SECRET_LENGTH,
                        "HMAC secret is shorter than recommended"
                    );
                }
            }
            (KeyMaterial::Secret(_), Some(kind)) => {
                return Err(fail(format!(
                    "{algorithm} requires an {kind} public key, not a shared secret"
                )));
            }
            (KeyMaterial::PublicKey(public), _) => {
                algorithm.check_key(public).map_err(fail)?;
            }
            (KeyMaterial::KeyProvider(_), None) => {
                return Err(fail(format!(
                    "{algorithm} verifies with a shared secret, not a key provider"
                )));
            }
            (KeyMaterial::KeyProvider(_), Some(_)) => {}
        }

        debug!(
            algorithm = %algorithm,
            key_source = key.source(),
            "verifier constructed"
        );

        Ok(Verifier::new(algorithm, key))
    }
}
