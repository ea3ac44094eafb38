//! Public key extraction from X.509 certificate files
//!
//! The file is read once, at construction time. Both encodings are accepted:
//! input whose first non-whitespace bytes are `-----BEGIN` is parsed as a
//! single PEM `CERTIFICATE` block, anything else as DER. Certificate
//! bundles with more than one PEM block are rejected.
//!
//! Only the subject public key is used. The certificate chain, signature and
//! extensions are not validated; an expired certificate is logged and its key
//! still accepted.

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::PublicKey;
use crate::limits::MAX_CERT_FILE_SIZE;
use der::{Decode, DecodePem, Encode};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use x509_cert::Certificate;

const PEM_PREFIX: &[u8] = b"-----BEGIN";

/// Load the certificate at `path` and return its key if `algorithm` can use it
pub(crate) fn load_public_key(path: &Path, algorithm: Algorithm) -> Result<PublicKey> {
    debug!(path = %path.display(), algorithm = %algorithm, "loading certificate");

    let fail = |message: String| Error::from_cert_file(format!("{}: {message}", path.display()));

    let bytes = read_bounded(path).map_err(fail)?;
    let cert = parse_certificate(&bytes).map_err(fail)?;
    warn_if_outside_validity(&cert, path);

    let spki_der = cert
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| fail(format!("failed to encode subject public key: {e}")))?;

    let key = PublicKey::from_spki(&spki_der).map_err(fail)?;
    algorithm.check_key(&key).map_err(fail)?;

    Ok(key)
}

fn read_bounded(path: &Path) -> std::result::Result<Vec<u8>, String> {
    let file = File::open(path).map_err(|e| format!("cannot open certificate file: {e}"))?;

    let mut bytes = Vec::new();
    file.take(MAX_CERT_FILE_SIZE + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| format!("cannot read certificate file: {e}"))?;

    if bytes.len() as u64 > MAX_CERT_FILE_SIZE {
        return Err(format!(
            "certificate file exceeds {MAX_CERT_FILE_SIZE} bytes"
        ));
    }
    if bytes.is_empty() {
        return Err("certificate file is empty".to_string());
    }

    Ok(bytes)
}

fn parse_certificate(bytes: &[u8]) -> std::result::Result<Certificate, String> {
    if is_pem(bytes) {
        let text = std::str::from_utf8(bytes).map_err(|e| format!("PEM file is not UTF-8: {e}"))?;
        if text.matches("-----BEGIN").count() > 1 {
            return Err(
                "certificate bundles are not supported, expected a single certificate".to_string(),
            );
        }
        Certificate::from_pem(text).map_err(|e| format!("invalid PEM certificate: {e}"))
    } else {
        Certificate::from_der(bytes).map_err(|e| format!("invalid DER certificate: {e}"))
    }
}

fn is_pem(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PEM_PREFIX)
}

fn warn_if_outside_validity(cert: &Certificate, path: &Path) {
    let Ok(now) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return;
    };
    let validity = &cert.tbs_certificate.validity;

    if validity.not_after.to_unix_duration() < now {
        warn!(
            path = %path.display(),
            not_after = validity.not_after.to_unix_duration().as_secs(),
            "certificate has expired, using its public key anyway"
        );
    } else if validity.not_before.to_unix_duration() > now {
        warn!(
            path = %path.display(),
            not_before = validity.not_before.to_unix_duration().as_secs(),
            "certificate is not yet valid, using its public key anyway"
        );
    }
}
