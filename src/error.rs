//! Error types for token verification
//!
//! Every failure that leaves this crate is an [`Error`]: a closed [`ErrorKind`]
//! tag plus a human-readable message. Construction-time failures carry the tag
//! of the factory that failed (`hmac256`, `rsa256`, `ecdsa512`, `fromCertFile`);
//! verify-time failures are tagged `verify` or `base64Decode`.

use thiserror::Error;

/// Closed set of failure tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Token rejected: malformed, wrong algorithm, bad signature or time claims
    Verify,
    /// A verified segment could not be decoded as canonical Base64URL text
    Base64Decode,
    /// The HS256 factory could not build a verifier
    Hmac256,
    /// The RS256 factory could not build a verifier
    Rsa256,
    /// The ES512 factory could not build a verifier
    Ecdsa512,
    /// A verification key could not be extracted from a certificate file
    FromCertFile,
}

impl ErrorKind {
    /// The tag as it appears in messages and logs
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Verify => "verify",
            ErrorKind::Base64Decode => "base64Decode",
            ErrorKind::Hmac256 => "hmac256",
            ErrorKind::Rsa256 => "rsa256",
            ErrorKind::Ecdsa512 => "ecdsa512",
            ErrorKind::FromCertFile => "fromCertFile",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged verification error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    /// Create an error with the given tag and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn base64_decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Base64Decode, message)
    }

    pub(crate) fn from_cert_file(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FromCertFile, message)
    }

    /// The failure tag
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The diagnostic message, without the tag
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias for jwtguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a token is rejected while its signature and claims are checked
///
/// Internal detail of the `verify` tag: every variant converts into an
/// [`Error`] of kind [`ErrorKind::Verify`] whose message is the variant's
/// display text.
#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum Rejection {
    #[error("token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("invalid token format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("signature Base64URL string too large: {size} bytes (maximum: {max} bytes)")]
    SignatureTooLarge { size: usize, max: usize },

    #[error("{segment} is not valid Base64URL: {reason}")]
    SegmentEncoding {
        segment: &'static str,
        reason: String,
    },

    #[error("{segment} is not valid JSON: {reason}")]
    SegmentJson {
        segment: &'static str,
        reason: String,
    },

    #[error("invalid header: {0}")]
    HeaderInvalid(&'static str),

    #[error("invalid registered time claims: 'exp', 'nbf' and 'iat' must be integer timestamps")]
    TimeClaimsInvalid,

    #[error("header field '{field}' too long: {length} bytes (maximum: {max} bytes)")]
    HeaderFieldTooLong {
        field: &'static str,
        length: usize,
        max: usize,
    },

    #[error("the 'none' algorithm is rejected")]
    AlgorithmNone,

    #[error("algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("algorithm mismatch: token uses '{found}', verifier expects '{expected}'")]
    AlgorithmMismatch {
        found: String,
        expected: &'static str,
    },

    #[error("no verification key available for kid {kid:?}")]
    KeyNotFound { kid: Option<String> },

    #[error("resolved key rejected: {0}")]
    KeyRejected(String),

    #[error("signature verification failed")]
    SignatureInvalid,

    #[error("token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    Expired {
        expired_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    NotYetValid {
        not_before: i64,
        now: i64,
        leeway: u64,
    },

    #[error("token issued in the future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    IssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("required claim 'exp' is missing")]
    MissingExpiration,

    #[error("claim '{claim}' out of bounds: {value} (valid range: {min} to {max})")]
    TimestampOutOfBounds {
        claim: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        Error::new(ErrorKind::Verify, rejection.to_string())
    }
}
