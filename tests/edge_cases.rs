//! Malformed input, decode failures and time-claim edge cases

mod common;

use common::*;
use jwtguard::{ErrorKind, VerificationOptions, Verifier};

fn verifier() -> Verifier {
    Verifier::hmac256(SECRET).unwrap()
}

#[test]
fn test_invalid_base64_characters_in_signed_payload() {
    // The signature covers the raw segment text, invalid characters included
    let header = b64(r#"{"alg":"HS256"}"#);
    let payload = format!("{}!", b64(r#"{"sub":"alice"}"#));
    let token = sign_hs256(&format!("{header}.{payload}"), SECRET);

    let err = verifier().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Base64Decode);
}

#[test]
fn test_padded_payload_fails_final_decode() {
    let header = b64(r#"{"alg":"HS256"}"#);
    // 13 bytes encode to 18 characters plus "==" padding
    let payload = format!("{}==", b64(r#"{"sub":"bob"}"#));
    let token = sign_hs256(&format!("{header}.{payload}"), SECRET);

    let err = verifier().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Base64Decode);
    assert!(err.to_string().starts_with("base64Decode: "));
}

#[test]
fn test_invalid_characters_with_bad_signature_is_verify_error() {
    let header = b64(r#"{"alg":"HS256"}"#);
    let payload = format!("{}!", b64(r#"{"sub":"alice"}"#));
    let token = format!("{header}.{payload}.{}", b64([0u8; 32]));

    assert_eq!(
        verifier().verify(&token).unwrap_err().kind(),
        ErrorKind::Verify
    );
}

#[test]
fn test_malformed_tokens() {
    let verifier = verifier();
    for token in [
        "",
        ".",
        "..",
        "abc",
        "a.b",
        "a.b.c.d",
        "not a token at all",
        "eyJhbGciOiJIUzI1NiJ9",
    ] {
        let err = verifier.verify(token).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::Verify,
            "{token:?} should be rejected"
        );
    }
}

#[test]
fn test_header_is_not_json() {
    let token = sign_hs256(&format!("{}.{}", b64("not json"), b64("{}")), SECRET);
    assert_eq!(
        verifier().verify(&token).unwrap_err().kind(),
        ErrorKind::Verify
    );
}

#[test]
fn test_payload_is_not_json() {
    let token = hs256_token(r#"{"alg":"HS256"}"#, "not json", SECRET);
    assert_eq!(
        verifier().verify(&token).unwrap_err().kind(),
        ErrorKind::Verify
    );
}

#[test]
fn test_mistyped_expiration() {
    let token = hs256_token(r#"{"alg":"HS256"}"#, r#"{"exp":"tomorrow"}"#, SECRET);
    assert_eq!(
        verifier().verify(&token).unwrap_err().kind(),
        ErrorKind::Verify
    );
}

#[test]
fn test_oversized_token() {
    let token = format!("{}.{}.sig", b64(r#"{"alg":"HS256"}"#), "A".repeat(70_000));
    let err = verifier().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(err.message().contains("too large"));
}

#[test]
fn test_oversized_decoded_header() {
    let header = format!(r#"{{"alg":"HS256","pad":"{}"}}"#, "x".repeat(10 * 1024));
    let token = hs256_token(&header, &valid_payload(), SECRET);
    let err = verifier().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(
        err.message().contains("decoded size exceeds limit"),
        "{}",
        err.message()
    );
}

#[test]
fn test_mistyped_typ_is_not_enforced() {
    let token = hs256_token(r#"{"alg":"HS256","typ":1}"#, &valid_payload(), SECRET);
    assert!(verifier().verify(&token).is_ok());
}

#[test]
fn test_mistyped_time_claim_diagnostic() {
    let token = hs256_token(r#"{"alg":"HS256"}"#, r#"{"exp":1.9e9}"#, SECRET);
    let err = verifier().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(
        err.message().contains("invalid registered time claims"),
        "{}",
        err.message()
    );
}

#[test]
fn test_oversized_kid() {
    let header = format!(r#"{{"alg":"HS256","kid":"{}"}}"#, "k".repeat(300));
    let token = hs256_token(&header, &valid_payload(), SECRET);
    let err = verifier().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(err.message().contains("kid"));
}

#[test]
fn test_not_yet_valid() {
    let payload = format!(r#"{{"nbf":{}}}"#, now() + 600);
    let token = hs256_token(r#"{"alg":"HS256"}"#, &payload, SECRET);
    let err = verifier().verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(err.message().contains("not valid until"));

    let lenient = verifier()
        .with_options(VerificationOptions::default().no_nbf_validation())
        .unwrap();
    assert!(lenient.verify(&token).is_ok());
}

#[test]
fn test_issued_in_future() {
    let payload = format!(r#"{{"iat":{}}}"#, now() + 600);
    let token = hs256_token(r#"{"alg":"HS256"}"#, &payload, SECRET);
    assert_eq!(
        verifier().verify(&token).unwrap_err().kind(),
        ErrorKind::Verify
    );
}

#[test]
fn test_leeway_accepts_recently_expired() {
    let payload = format!(r#"{{"exp":{}}}"#, now() - 30);
    let token = hs256_token(r#"{"alg":"HS256"}"#, &payload, SECRET);

    assert!(verifier().verify(&token).is_err());
    let lenient = verifier()
        .with_options(VerificationOptions::default().leeway(120))
        .unwrap();
    assert!(lenient.verify(&token).is_ok());
}

#[test]
fn test_require_expiration() {
    let token = hs256_token(r#"{"alg":"HS256"}"#, r#"{"sub":"alice"}"#, SECRET);
    assert!(verifier().verify(&token).is_ok());

    let strict = verifier()
        .with_options(VerificationOptions::default().require_expiration())
        .unwrap();
    let err = strict.verify(&token).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verify);
    assert!(err.message().contains("'exp'"));
}

#[test]
fn test_out_of_range_timestamps() {
    for payload in [r#"{"exp":-1}"#, r#"{"exp":4102444801}"#, r#"{"nbf":-5}"#] {
        let token = hs256_token(r#"{"alg":"HS256"}"#, payload, SECRET);
        let err = verifier().verify(&token).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::Verify,
            "{payload} should be rejected"
        );
        assert!(err.message().contains("out of bounds"));
    }
}

#[test]
fn test_unicode_claims_round_trip() {
    let payload = r#"{"sub":"ålice","name":"日本語"}"#;
    let token = hs256_token(r#"{"alg":"HS256"}"#, payload, SECRET);
    assert_eq!(verifier().verify(&token).unwrap().payload, payload);
}
