//! AES-256-GCM authenticated encryption of the credential payload.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.
//!
//! Layout of the `config.enc` file:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Why a blob could not be opened.
///
/// The vault layer folds every variant into `VaultError::DecryptionFailed`;
/// the detail only shows up in debug logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("key must be 32 bytes")]
    InvalidKeyLength,

    #[error("ciphertext is {0} bytes, shorter than nonce + tag")]
    Truncated(usize),

    #[error("authentication tag mismatch")]
    Authentication,
}

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// The plaintext comes back in a zeroizing buffer.
pub fn decrypt(
    key: &[u8],
    ciphertext_with_nonce: &[u8],
) -> std::result::Result<Zeroizing<Vec<u8>>, CipherError> {
    if ciphertext_with_nonce.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::Truncated(ciphertext_with_nonce.len()));
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CipherError::Authentication)
}
