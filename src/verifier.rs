use crate::algorithm::{Algorithm, VerificationKey};
use crate::claims::{RegisteredClaims, current_timestamp, validate_claims};
use crate::error::{Error, Rejection, Result};
use crate::header::TokenHeader;
use crate::keys::{KeyLookup, KeyMaterial, KeyProvider, PublicKey};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
};
use crate::options::VerificationOptions;
use crate::token::{DecodedToken, TokenParts};
use crate::utils::base64url;
use tracing::{debug, trace};

/// Token verifier for one algorithm and one source of key material
///
/// A verifier is immutable once built and can be shared across threads
/// (e.g. behind an `Arc`). Time claims are evaluated against the wall clock
/// on every call to [`verify`](Verifier::verify).
#[derive(Debug, Clone)]
pub struct Verifier {
    algorithm: Algorithm,
    key: KeyMaterial,
    options: VerificationOptions,
}

impl Verifier {
    pub(crate) fn new(algorithm: Algorithm, key: KeyMaterial) -> Self {
        Self {
            algorithm,
            key,
            options: VerificationOptions::default(),
        }
    }

    /// Replace the time-claim options
    ///
    /// Fails with the verifier family's tag when the options are out of
    /// bounds (leeway above 300 seconds).
    pub fn with_options(mut self, options: VerificationOptions) -> Result<Self> {
        options
            .check()
            .map_err(|e| Error::new(self.algorithm.error_kind(), e))?;
        self.options = options;
        Ok(self)
    }

    /// The only algorithm this verifier accepts in a token header
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Key material signatures are checked against
    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    /// Time-claim options applied by [`verify`](Verifier::verify)
    pub fn options(&self) -> &VerificationOptions {
        &self.options
    }

    /// Verify a compact-serialized token and decode its header and payload
    ///
    /// Signature and time claims are checked first; any failure there is a
    /// `verify` error. The verified segments are then decoded as canonical
    /// Base64URL text, which fails with `base64Decode`.
    pub fn verify(&self, token: &str) -> Result<DecodedToken<String>> {
        self.verify_at(token, current_timestamp())
    }

    pub(crate) fn verify_at(&self, token: &str, now: i64) -> Result<DecodedToken<String>> {
        let raw = self.check(token, now).map_err(|rejection| {
            debug!(
                algorithm = %self.algorithm,
                kind = "verify",
                reason = %rejection,
                "token rejected"
            );
            Error::from(rejection)
        })?;

        let (header, payload) = raw.into_parts();
        DecodedToken::new(
            ("header", header, MAX_DECODED_HEADER_SIZE),
            ("payload", payload, MAX_DECODED_PAYLOAD_SIZE),
        )
        .try_map(|(segment, text, max_size)| {
            base64url::decode_text_strict(text, max_size).map_err(|e| {
                debug!(
                    algorithm = %self.algorithm,
                    kind = "base64Decode",
                    segment,
                    reason = %e,
                    "verified token could not be decoded"
                );
                Error::base64_decode(format!("{segment} is not canonical Base64URL text: {e}"))
            })
        })
    }

    /// Signature and claim checks; returns the still-encoded segments
    fn check<'t>(
        &self,
        token: &'t str,
        now: i64,
    ) -> std::result::Result<DecodedToken<&'t str>, Rejection> {
        let parts = TokenParts::split(token)?;

        let header_json = decode_segment("header", parts.header, MAX_DECODED_HEADER_SIZE)?;
        let header = TokenHeader::parse(&header_json)?;

        let algorithm = Algorithm::from_header(&header.algorithm)?;
        if algorithm != self.algorithm {
            return Err(Rejection::AlgorithmMismatch {
                found: algorithm.to_string(),
                expected: self.algorithm.as_str(),
            });
        }

        let signature = base64url::decode_lenient(parts.signature, MAX_DECODED_SIGNATURE_SIZE)
            .map_err(|reason| Rejection::SegmentEncoding {
                segment: "signature",
                reason,
            })?;

        let resolved: PublicKey;
        let key = match &self.key {
            KeyMaterial::Secret(secret) => VerificationKey::Secret(secret.as_bytes()),
            KeyMaterial::PublicKey(public) => VerificationKey::Public(public),
            KeyMaterial::KeyProvider(provider) => {
                resolved = self.resolve_key(provider, header.key_id.as_deref())?;
                VerificationKey::Public(&resolved)
            }
        };

        self.algorithm
            .verify_signature(parts.signing_input(), &signature, key)?;

        let payload_json = decode_segment("payload", parts.payload, MAX_DECODED_PAYLOAD_SIZE)?;
        let claims = RegisteredClaims::parse(&payload_json)?;
        validate_claims(&claims, &self.options, now)?;

        trace!(
            algorithm = %self.algorithm,
            kid = header.key_id.as_deref(),
            typ = header.token_type(),
            "token verified"
        );

        Ok(DecodedToken::new(parts.header, parts.payload))
    }

    fn resolve_key(
        &self,
        provider: &KeyProvider,
        key_id: Option<&str>,
    ) -> std::result::Result<PublicKey, Rejection> {
        let lookup = KeyLookup {
            key_id,
            algorithm: self.algorithm,
        };

        let key = provider.resolve(&lookup).ok_or_else(|| Rejection::KeyNotFound {
            kid: key_id.map(str::to_string),
        })?;

        self.algorithm
            .check_key(&key)
            .map_err(Rejection::KeyRejected)?;

        Ok(key)
    }
}

fn decode_segment(
    segment: &'static str,
    input: &str,
    max_size: usize,
) -> std::result::Result<String, Rejection> {
    let bytes = base64url::decode_lenient(input, max_size)
        .map_err(|reason| Rejection::SegmentEncoding { segment, reason })?;
    String::from_utf8(bytes).map_err(|e| Rejection::SegmentJson {
        segment,
        reason: format!("invalid UTF-8: {e}"),
    })
}
