//! Secret store abstraction for the vault key.
//!
//! The derived vault key is the only secret that never touches the vault
//! directory.  It lives in a per-user credential facility addressed by a
//! `(service, account)` pair:
//! - `KeyringStore`: the operating system's store (macOS Keychain, Windows
//!   Credential Manager, Linux Secret Service with a keyutils cache)
//! - `MemoryStore`: an in-process map for tests and embedders

mod os_keyring;
mod memory;

pub use self::os_keyring::KeyringStore;
pub use self::memory::MemoryStore;

use zeroize::Zeroizing;

use crate::errors::Result;

/// Capability set over a secure per-user key/value store.
pub trait SecretStore {
    /// Store (or overwrite) `value` under `(service, account)`.
    fn put(&self, service: &str, account: &str, value: &str) -> Result<()>;

    /// Fetch the value under `(service, account)`.
    ///
    /// Returns `None` when no entry exists, which callers treat as
    /// "not initialized" rather than a failure.
    fn get(&self, service: &str, account: &str) -> Result<Option<Zeroizing<String>>>;

    /// Remove the entry under `(service, account)`.
    ///
    /// Returns `false` if there was nothing to remove.
    fn delete(&self, service: &str, account: &str) -> Result<bool>;
}
