//! Integration tests for the key derivation and encryption layer.

use zoho_invoice::crypto::kdf::{KdfParams, MIN_ITERATIONS, SALT_LEN};
use zoho_invoice::crypto::{decrypt, derive, derive_key, encrypt, generate_salt, CipherError};

const FAST: KdfParams = KdfParams {
    iterations: MIN_ITERATIONS,
};

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = br#"{"client_id":"1000.ABC","organization_id":"600"}"#;

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");

    // 12-byte nonce + 16-byte tag on top of the plaintext.
    assert_eq!(ciphertext.len(), plaintext.len() + 28);

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered.as_slice(), plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"{}";

    let ct1 = encrypt(&key, plaintext).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    assert_ne!(ct1, ct2, "each encryption must use a fresh nonce");
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let ciphertext = encrypt(&[0x11u8; 32], b"{\"refresh_token\":\"x\"}").expect("encrypt");
    let result = decrypt(&[0x22u8; 32], &ciphertext);

    assert_eq!(result.unwrap_err(), CipherError::Authentication);
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let result = decrypt(&[0xAAu8; 32], &[0u8; 5]);
    assert_eq!(result.unwrap_err(), CipherError::Truncated(5));
}

#[test]
fn every_single_byte_flip_is_detected() {
    let key = [0xBBu8; 32];
    let ciphertext = encrypt(&key, b"{\"client_secret\":\"s\"}").expect("encrypt");

    for i in 0..ciphertext.len() {
        let mut tampered = ciphertext.clone();
        tampered[i] ^= 0x80;
        assert!(
            decrypt(&key, &tampered).is_err(),
            "flip at byte {i} went unnoticed"
        );
    }
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn derive_is_deterministic() {
    let salt = [0x42u8; SALT_LEN];
    let k1 = derive_key(b"hunter2hunter2", &salt, &FAST).unwrap();
    let k2 = derive_key(b"hunter2hunter2", &salt, &FAST).unwrap();
    assert_eq!(k1, k2);
}

#[test]
fn different_salts_give_different_keys() {
    let k1 = derive_key(b"same passphrase", &[1u8; SALT_LEN], &FAST).unwrap();
    let k2 = derive_key(b"same passphrase", &[2u8; SALT_LEN], &FAST).unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn different_passphrases_give_different_keys() {
    let salt = [9u8; SALT_LEN];
    let k1 = derive_key(b"passphrase one", &salt, &FAST).unwrap();
    let k2 = derive_key(b"passphrase two", &salt, &FAST).unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn iteration_count_changes_key() {
    let salt = [3u8; SALT_LEN];
    let k1 = derive_key(b"passphrase", &salt, &FAST).unwrap();
    let k2 = derive_key(
        b"passphrase",
        &salt,
        &KdfParams {
            iterations: MIN_ITERATIONS + 1,
        },
    )
    .unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn fresh_salts_are_random() {
    assert_ne!(generate_salt(), generate_salt());
}

#[test]
fn derive_without_salt_yields_distinct_keys_per_call() {
    let (k1, s1) = derive(b"passphrase", None, &FAST).unwrap();
    let (k2, s2) = derive(b"passphrase", None, &FAST).unwrap();
    assert_ne!(s1, s2);
    assert_ne!(k1, k2);
}

#[test]
fn derived_key_encrypts_and_decrypts() {
    let (key, _) = derive(b"passphrase", None, &FAST).unwrap();
    let blob = encrypt(key.as_bytes(), b"payload").unwrap();
    assert_eq!(decrypt(key.as_bytes(), &blob).unwrap().as_slice(), b"payload");
}
