use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::{KeyMaterial, KeyProvider, PublicKey, Secret};
use crate::options::VerificationOptions;
use crate::verifier::Verifier;
use std::path::PathBuf;

/// Where a verifier gets its key
#[derive(Debug, Clone)]
pub enum KeySource {
    /// Inline shared secret (HS256)
    Secret(Secret),
    /// Inline public key (RS256, ES512)
    PublicKey(PublicKey),
    /// Per-token key lookup (RS256, ES512)
    Provider(KeyProvider),
    /// X.509 certificate file, PEM or DER (RS256, ES512)
    CertFile(PathBuf),
}

/// Declarative verifier configuration
///
/// Chosen once, typically at startup, and turned into a [`Verifier`] with
/// [`build`](VerifierConfig::build).
///
/// ```no_run
/// use jwtguard::{Algorithm, KeySource, VerificationOptions, VerifierConfig};
///
/// let verifier = VerifierConfig::new(Algorithm::RS256, KeySource::CertFile("issuer.pem".into()))
///     .options(VerificationOptions::default().leeway(30))
///     .build()?;
/// # Ok::<(), jwtguard::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub algorithm: Algorithm,
    pub key: KeySource,
    pub options: VerificationOptions,
}

impl VerifierConfig {
    pub fn new(algorithm: Algorithm, key: KeySource) -> Self {
        Self {
            algorithm,
            key,
            options: VerificationOptions::default(),
        }
    }

    pub fn options(mut self, options: VerificationOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the verifier, resolving the key source
    pub fn build(&self) -> Result<Verifier> {
        let verifier = match (&self.key, self.algorithm) {
            (KeySource::CertFile(path), Algorithm::RS256) => Verifier::rsa256_from_cert_file(path)?,
            (KeySource::CertFile(path), Algorithm::ES512) => {
                Verifier::ecdsa512_from_cert_file(path)?
            }
            (KeySource::CertFile(_), Algorithm::HS256) => {
                return Err(Error::new(
                    self.algorithm.error_kind(),
                    "a certificate file carries no shared secret",
                ));
            }
            (KeySource::Secret(secret), algorithm) => {
                Verifier::from_key_material(algorithm, KeyMaterial::Secret(secret.clone()))?
            }
            (KeySource::PublicKey(key), algorithm) => {
                Verifier::from_key_material(algorithm, KeyMaterial::PublicKey(key.clone()))?
            }
            (KeySource::Provider(provider), algorithm) => Verifier::from_key_material(
                algorithm,
                KeyMaterial::KeyProvider(provider.clone()),
            )?,
        };

        verifier.with_options(self.options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_build_hmac() {
        let verifier = VerifierConfig::new(Algorithm::HS256, KeySource::Secret("s3cr3t".into()))
            .options(VerificationOptions::default().leeway(10))
            .build()
            .unwrap();
        assert_eq!(verifier.algorithm(), Algorithm::HS256);
        assert_eq!(verifier.options().leeway_seconds(), 10);
    }

    #[test]
    fn test_cert_file_for_hmac_is_rejected() {
        let config = VerifierConfig::new(Algorithm::HS256, KeySource::CertFile("cert.pem".into()));
        assert_eq!(config.build().unwrap_err().kind(), ErrorKind::Hmac256);
    }

    #[test]
    fn test_secret_for_rsa_is_rejected() {
        let config = VerifierConfig::new(Algorithm::RS256, KeySource::Secret("s3cr3t".into()));
        assert_eq!(config.build().unwrap_err().kind(), ErrorKind::Rsa256);
    }

    #[test]
    fn test_excessive_leeway_is_rejected() {
        let config = VerifierConfig::new(Algorithm::HS256, KeySource::Secret("s3cr3t".into()))
            .options(VerificationOptions::default().leeway(3600));
        assert_eq!(config.build().unwrap_err().kind(), ErrorKind::Hmac256);
    }
}
