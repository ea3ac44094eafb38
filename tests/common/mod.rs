//! Shared helpers for integration tests: token signing and fixtures
#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P521_SHA512_FIXED_SIGNING, EcdsaKeyPair, RSA_PKCS1_SHA256, RsaKeyPair,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use jwtguard::PublicKey;
use sha2::Sha256;
use std::path::PathBuf;

pub const SECRET: &[u8] = b"a-shared-secret-of-at-least-32-bytes";

pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn b64(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures")).join(name)
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture(name)).unwrap()
}

/// Payload with `sub` and an expiration one hour ahead
pub fn valid_payload() -> String {
    format!(
        r#"{{"sub":"alice","iat":{},"exp":{}}}"#,
        now(),
        now() + 3600
    )
}

// ---------------------------------------------------------------------------
// Signing: the input is the raw `header.payload` text, encoded or not
// ---------------------------------------------------------------------------

pub fn sign_hs256(signing_input: &str, secret: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(signing_input.as_bytes());
    format!("{signing_input}.{}", b64(mac.finalize().into_bytes()))
}

pub fn sign_rs256(signing_input: &str) -> String {
    let keypair = RsaKeyPair::from_pkcs8(&fixture_bytes("rsa_key.pk8.der")).unwrap();
    let rng = SystemRandom::new();
    let mut signature = vec![0u8; keypair.public_modulus_len()];
    keypair
        .sign(
            &RSA_PKCS1_SHA256,
            &rng,
            signing_input.as_bytes(),
            &mut signature,
        )
        .unwrap();
    format!("{signing_input}.{}", b64(signature))
}

pub fn sign_es512(signing_input: &str) -> String {
    let keypair = EcdsaKeyPair::from_pkcs8(
        &ECDSA_P521_SHA512_FIXED_SIGNING,
        &fixture_bytes("ec521_key.pk8.der"),
    )
    .unwrap();
    let rng = SystemRandom::new();
    let signature = keypair.sign(&rng, signing_input.as_bytes()).unwrap();
    format!("{signing_input}.{}", b64(signature.as_ref()))
}

fn signing_input(header: &str, payload: &str) -> String {
    format!("{}.{}", b64(header), b64(payload))
}

pub fn hs256_token(header: &str, payload: &str, secret: &[u8]) -> String {
    sign_hs256(&signing_input(header, payload), secret)
}

pub fn rs256_token(header: &str, payload: &str) -> String {
    sign_rs256(&signing_input(header, payload))
}

pub fn es512_token(header: &str, payload: &str) -> String {
    sign_es512(&signing_input(header, payload))
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

pub fn rsa_public_key() -> PublicKey {
    PublicKey::rsa_der(&fixture_bytes("rsa_public.der")).unwrap()
}

pub fn other_rsa_public_key() -> PublicKey {
    PublicKey::rsa_der(&fixture_bytes("rsa2_public.der")).unwrap()
}

pub fn ec_public_key() -> PublicKey {
    PublicKey::ec_der(&fixture_bytes("ec521_public.der")).unwrap()
}
