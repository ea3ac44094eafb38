//! # jwtguard - Bearer Token Verification
//!
//! **jwtguard** verifies compact-serialized JSON Web Tokens signed with HS256, RS256 or
//! ES512 and hands back the decoded header and payload text. It is meant to sit at the
//! request boundary: nothing inside a token should be trusted until `verify` succeeds.
//!
//! ## Overview
//!
//! A [`Verifier`] is built once, from a shared secret, a public key, a key provider
//! callback or an X.509 certificate file, and then shared by every request handler.
//! Each call to [`Verifier::verify`]:
//!
//! ```text
//! token ──split──▶ header.payload.signature
//!         │ header `alg` must equal the verifier's algorithm (`none` is rejected)
//!         ▼
//!       signature check against the key material
//!         │ exp / nbf / iat against the wall clock, with optional leeway
//!         ▼
//!       canonical Base64URL decode of header and payload
//!         ▼
//!       DecodedToken<String>
//! ```
//!
//! The claims are returned as JSON text; parsing them into application types is left to
//! the caller.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jwtguard::Verifier;
//!
//! # let token = "";
//! let verifier = Verifier::hmac256("a-shared-secret-of-at-least-32-bytes")?;
//! let decoded = verifier.verify(token)?;
//! println!("claims: {}", decoded.payload);
//! # Ok::<(), jwtguard::Error>(())
//! ```
//!
//! Asymmetric verifiers take a key directly, a certificate file, or a [`KeyProvider`]
//! for key rotation:
//!
//! ```no_run
//! use jwtguard::{KeyProvider, PublicKey, Verifier};
//!
//! let rsa = Verifier::rsa256_from_cert_file("/etc/issuer/cert.pem")?;
//! let ec = Verifier::ecdsa512_from_cert_file("/etc/issuer/cert.der")?;
//!
//! let current = PublicKey::rsa_pem(&std::fs::read_to_string("/etc/issuer/public.pem")?)?;
//! let rotating = Verifier::rsa256_with_provider(KeyProvider::from_keys([("2024-01", current)]))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`Error`] with one of six tags ([`ErrorKind`]):
//!
//! | Tag | Raised by |
//! |---|---|
//! | `verify` | `verify`: malformed token, wrong algorithm, bad signature, time claims |
//! | `base64Decode` | `verify`: a verified segment is not canonical Base64URL text |
//! | `hmac256` | HS256 factory |
//! | `rsa256` | RS256 factories |
//! | `ecdsa512` | ES512 factories |
//! | `fromCertFile` | certificate-file factories |
//!
//! A factory error means no verifier exists; callers must fail closed.
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`]: factory construction and certificate loading at
//! `debug`, short secrets and expired certificates at `warn`, rejected tokens at `debug`.
//! Secrets, keys and token contents are never logged.

mod error;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod cert;
pub(crate) mod claims;
pub(crate) mod config;
pub(crate) mod factory;
pub(crate) mod header;
pub(crate) mod keys;
pub(crate) mod options;
pub(crate) mod token;
pub(crate) mod utils;
pub(crate) mod verifier;

// Public Interface
pub use algorithm::Algorithm;
pub use config::{KeySource, VerifierConfig};
pub use error::{Error, ErrorKind, Result};
pub use keys::{EcCurve, KeyKind, KeyLookup, KeyMaterial, KeyProvider, PublicKey, Secret};
pub use options::VerificationOptions;
pub use token::DecodedToken;
pub use verifier::Verifier;

pub(crate) mod limits;
