//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The vault key is derived once from the user's passphrase and a random
//! 16-byte salt, then parked in the system keyring.  The iteration count
//! is deliberately high so that every offline passphrase guess costs a
//! noticeable amount of CPU time.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{Result, VaultError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Default PBKDF2 round count.
pub const DEFAULT_ITERATIONS: u32 = 480_000;

/// Lowest round count we accept, even from a settings file.
pub const MIN_ITERATIONS: u32 = 10_000;

/// Raw salt bytes as stored in the `salt` file.
pub type Salt = [u8; SALT_LEN];

/// PBKDF2 parameters.
///
/// The CLI always uses `KdfParams::default()`; a vault can only be recovered
/// with the parameters it was written with.  Lower counts are for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of HMAC-SHA256 rounds (default: 480 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// A 32-byte symmetric key derived from a passphrase.
///
/// The bytes are wiped when the value is dropped, so the key never
/// outlives the operation that needed it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Encode the key as standard base64 text for the keyring.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(BASE64.encode(self.bytes))
    }

    /// Decode a key previously produced by `to_base64`.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            BASE64
                .decode(encoded.trim())
                .map_err(|e| VaultError::InvalidStoredKey(format!("not valid base64: {e}")))?,
        );

        if decoded.len() != KEY_LEN {
            return Err(VaultError::InvalidStoredKey(format!(
                "expected {KEY_LEN} bytes, found {}",
                decoded.len()
            )));
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for DerivedKey {}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Derive a 32-byte key from a passphrase and a known salt.
///
/// The same passphrase + salt + params always produce the same key.
pub fn derive_key(passphrase: &[u8], salt: &Salt, params: &KdfParams) -> Result<DerivedKey> {
    if params.iterations < MIN_ITERATIONS {
        return Err(VaultError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, params.iterations, &mut bytes);
    let key = DerivedKey::new(bytes);
    bytes.zeroize();

    tracing::debug!(iterations = params.iterations, "derived vault key via PBKDF2");
    Ok(key)
}

/// Derive a key, generating a fresh salt when none is supplied.
///
/// Returns the key together with the salt that produced it.  Passing
/// `None` is the only way new salt comes into existence.
pub fn derive(
    passphrase: &[u8],
    salt: Option<&Salt>,
    params: &KdfParams,
) -> Result<(DerivedKey, Salt)> {
    let salt = match salt {
        Some(existing) => *existing,
        None => generate_salt(),
    };
    let key = derive_key(passphrase, &salt, params)?;
    Ok((key, salt))
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
