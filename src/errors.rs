use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in the credential vault and its CLI.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Secret store errors ---
    #[error(
        "Encryption key not found in the system keyring ({service}/{account}) — run `config setup` first"
    )]
    KeyNotFound { service: String, account: String },

    #[error("Keyring error while {op} ({service}/{account}): {message}")]
    SecretStore {
        op: &'static str,
        service: String,
        account: String,
        message: String,
    },

    #[error("Stored encryption key is malformed: {0}")]
    InvalidStoredKey(String),

    // --- Vault file errors ---
    #[error("No stored credentials found at {0}")]
    VaultFileMissing(PathBuf),

    #[error("Salt file not found at {0}")]
    SaltMissing(PathBuf),

    #[error("Salt file {path} is corrupt: expected 16 bytes, found {len}")]
    CorruptSalt { path: PathBuf, len: usize },

    #[error("Credentials already stored at {0} — use `config rotate` or `config delete` first")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to {op} {path}: {source}")]
    FileIo {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption of {0} failed — wrong passphrase, or the file is corrupted or tampered")]
    DecryptionFailed(PathBuf),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Credential errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Required credential field '{0}' is missing or empty")]
    MissingField(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Passphrase mismatch — passphrases do not match")]
    PassphraseMismatch,

    #[error("Passphrase must be at least {0} characters")]
    WeakPassphrase(usize),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for vault results.
pub type Result<T> = std::result::Result<T, VaultError>;
