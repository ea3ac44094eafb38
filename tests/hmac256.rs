//! HS256 verification

mod common;

use common::*;
use jwtguard::{ErrorKind, Verifier};

#[test]
fn test_alice_token_verifies_with_matching_secret() {
    let token = hs256_token(
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"sub":"alice"}"#,
        b"s3cr3t",
    );

    let verifier = Verifier::hmac256("s3cr3t").expect("short secrets are accepted");
    let decoded = verifier.verify(&token).expect("token should verify");

    assert_eq!(decoded.header, r#"{"alg":"HS256","typ":"JWT"}"#);
    assert_eq!(decoded.payload, r#"{"sub":"alice"}"#);
}

#[test]
fn test_alice_token_rejected_with_wrong_secret() {
    let token = hs256_token(
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"sub":"alice"}"#,
        b"s3cr3t",
    );

    let verifier = Verifier::hmac256("wrong").unwrap();
    let err = verifier.verify(&token).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(err.message().contains("signature"));
}

#[test]
fn test_decoded_segments_match_original_text() {
    let header = r#"{"alg":"HS256","kid":"k1"}"#;
    let payload = valid_payload();
    let token = hs256_token(header, &payload, SECRET);

    let decoded = Verifier::hmac256(SECRET).unwrap().verify(&token).unwrap();
    assert_eq!(decoded.header, header);
    assert_eq!(decoded.payload, payload);
}

#[test]
fn test_byte_secret() {
    let secret: Vec<u8> = (0u8..64).collect();
    let token = hs256_token(r#"{"alg":"HS256"}"#, &valid_payload(), &secret);

    assert!(Verifier::hmac256(secret.clone()).unwrap().verify(&token).is_ok());
    assert!(Verifier::hmac256(&secret[..32]).unwrap().verify(&token).is_err());
}

#[test]
fn test_empty_secret_produces_no_verifier() {
    let err = Verifier::hmac256(Vec::<u8>::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Hmac256);
    assert_eq!(err.to_string(), "hmac256: HMAC secret must not be empty");
}

#[test]
fn test_expired_token_rejected_despite_valid_signature() {
    let payload = format!(r#"{{"sub":"alice","exp":{}}}"#, now() - 60);
    let token = hs256_token(r#"{"alg":"HS256"}"#, &payload, SECRET);

    let err = Verifier::hmac256(SECRET).unwrap().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(err.message().contains("expired"));
}

#[test]
fn test_tampered_payload_rejected() {
    let token = hs256_token(r#"{"alg":"HS256"}"#, r#"{"sub":"alice"}"#, SECRET);
    let mut parts: Vec<&str> = token.split('.').collect();
    let forged = b64(r#"{"sub":"admin"}"#);
    parts[1] = &forged;

    let err = Verifier::hmac256(SECRET)
        .unwrap()
        .verify(&parts.join("."))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
}

#[test]
fn test_verifier_is_reusable_after_failure() {
    let verifier = Verifier::hmac256(SECRET).unwrap();
    let good = hs256_token(r#"{"alg":"HS256"}"#, &valid_payload(), SECRET);
    let bad = hs256_token(r#"{"alg":"HS256"}"#, &valid_payload(), b"another-secret");

    assert!(verifier.verify(&bad).is_err());
    assert!(verifier.verify(&good).is_ok());
    assert!(verifier.verify(&bad).is_err());
}
