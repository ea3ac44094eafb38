//! DER utilities for SubjectPublicKeyInfo inspection and construction
//!
//! Every public key handled by this crate is normalized to SPKI DER and
//! classified here, using the RustCrypto `spki` and `der` crates.

use crate::keys::EcCurve;
use der::asn1::{AnyRef, BitString, UintRef};
use der::{Decode, DecodePem, Encode, Sequence};
use spki::{
    AlgorithmIdentifierOwned, ObjectIdentifier, SubjectPublicKeyInfoOwned, SubjectPublicKeyInfoRef,
};

/// rsaEncryption (PKCS #1)
pub(crate) const RSA_ENCRYPTION_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-ecPublicKey (X9.62)
pub(crate) const EC_PUBLIC_KEY_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Named curve OIDs (RFC 5480)
pub(crate) const SECP256R1_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
pub(crate) const SECP384R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
pub(crate) const SECP521R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

/// RSA public key structure for DER encoding
///
/// Represents RSAPublicKey as defined in RFC 3447:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// Algorithm family and parameters of a parsed public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyShape {
    Rsa { modulus_bits: usize },
    Ec { curve: EcCurve },
}

/// A classified SubjectPublicKeyInfo
#[derive(Debug, Clone)]
pub(crate) struct ParsedSpki {
    pub shape: KeyShape,
    /// Contents of the subjectPublicKey BIT STRING (PKCS#1 key or EC point)
    pub key_bits: Vec<u8>,
}

/// Parse and classify SPKI DER
pub(crate) fn parse_spki(spki_der: &[u8]) -> std::result::Result<ParsedSpki, String> {
    let spki = SubjectPublicKeyInfoRef::from_der(spki_der)
        .map_err(|e| format!("invalid SubjectPublicKeyInfo: {e}"))?;

    let key_bits = spki
        .subject_public_key
        .as_bytes()
        .ok_or_else(|| "subjectPublicKey has unused bits".to_string())?;

    let oid = spki.algorithm.oid;
    let shape = if oid == RSA_ENCRYPTION_OID {
        let rsa = RsaPublicKey::from_der(key_bits)
            .map_err(|e| format!("invalid RSA public key: {e}"))?;
        KeyShape::Rsa {
            modulus_bits: bit_length(rsa.modulus.as_bytes()),
        }
    } else if oid == EC_PUBLIC_KEY_OID {
        let curve_oid = spki
            .algorithm
            .parameters_oid()
            .map_err(|e| format!("EC key without named curve: {e}"))?;
        let curve = EcCurve::from_oid(&curve_oid)
            .ok_or_else(|| format!("unsupported EC curve {curve_oid}"))?;
        validate_ec_point(curve, key_bits)?;
        KeyShape::Ec { curve }
    } else {
        return Err(format!("unsupported public key algorithm {oid}"));
    };

    Ok(ParsedSpki {
        shape,
        key_bits: key_bits.to_vec(),
    })
}

/// Decode a `-----BEGIN PUBLIC KEY-----` document into SPKI DER
pub(crate) fn spki_der_from_pem(pem: &str) -> std::result::Result<Vec<u8>, String> {
    let spki = SubjectPublicKeyInfoOwned::from_pem(pem)
        .map_err(|e| format!("invalid PUBLIC KEY PEM: {e}"))?;
    spki.to_der()
        .map_err(|e| format!("failed to encode SPKI: {e}"))
}

/// Build SPKI DER for RSA from modulus (n) and exponent (e) bytes
pub(crate) fn rsa_spki_from_n_e(n: &[u8], e: &[u8]) -> std::result::Result<Vec<u8>, String> {
    if n.is_empty() || e.is_empty() {
        return Err("RSA key missing modulus or exponent".to_string());
    }

    let rsa_pubkey = RsaPublicKey {
        modulus: UintRef::new(n).map_err(|e| format!("failed to encode RSA modulus: {e}"))?,
        public_exponent: UintRef::new(e)
            .map_err(|e| format!("failed to encode RSA exponent: {e}"))?,
    };

    let rsa_pubkey_der = rsa_pubkey
        .to_der()
        .map_err(|e| format!("failed to encode RSA public key: {e}"))?;

    wrap_spki(RSA_ENCRYPTION_OID, AnyRef::NULL, rsa_pubkey_der)
}

/// Build SPKI DER for RSA from a PKCS#1 RSAPublicKey document
pub(crate) fn rsa_spki_from_pkcs1(pkcs1_der: &[u8]) -> std::result::Result<Vec<u8>, String> {
    RsaPublicKey::from_der(pkcs1_der).map_err(|e| format!("invalid PKCS#1 RSA public key: {e}"))?;
    wrap_spki(RSA_ENCRYPTION_OID, AnyRef::NULL, pkcs1_der.to_vec())
}

/// Build SPKI DER for an EC public key from its uncompressed point (04 || x || y)
pub(crate) fn ec_spki_from_point(
    curve: EcCurve,
    point: &[u8],
) -> std::result::Result<Vec<u8>, String> {
    validate_ec_point(curve, point)?;
    let curve_oid = curve.oid();
    wrap_spki(EC_PUBLIC_KEY_OID, AnyRef::from(&curve_oid), point.to_vec())
}

fn wrap_spki(
    oid: ObjectIdentifier,
    parameters: AnyRef<'_>,
    key_bits: Vec<u8>,
) -> std::result::Result<Vec<u8>, String> {
    let algorithm = AlgorithmIdentifierOwned {
        oid,
        parameters: Some(parameters.into()),
    };

    let subject_public_key =
        BitString::new(0, key_bits).map_err(|e| format!("failed to create bit string: {e}"))?;

    SubjectPublicKeyInfoOwned {
        algorithm,
        subject_public_key,
    }
    .to_der()
    .map_err(|e| format!("failed to encode SPKI: {e}"))
}

fn validate_ec_point(curve: EcCurve, point: &[u8]) -> std::result::Result<(), String> {
    let expected = curve.uncompressed_point_len();
    if point.len() != expected || point.first() != Some(&0x04) {
        return Err(format!(
            "EC point for {} must be uncompressed ({expected} bytes, got {})",
            curve.name(),
            point.len()
        ));
    }
    Ok(())
}

/// Number of significant bits in a big-endian unsigned integer
fn bit_length(bytes: &[u8]) -> usize {
    match bytes.iter().position(|b| *b != 0) {
        Some(first) => (bytes.len() - first) * 8 - bytes[first].leading_zeros() as usize,
        None => 0,
    }
}
