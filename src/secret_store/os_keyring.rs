//! OS keyring backend.
//!
//! All backend failures other than a missing entry are surfaced as
//! `VaultError::SecretStore` with the operation and entry attached.

use zeroize::Zeroizing;

use super::SecretStore;
use crate::errors::{Result, VaultError};

/// Secret store backed by the platform credential manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringStore;

impl KeyringStore {
    /// Create a new keyring store handle.
    pub fn new() -> Self {
        Self
    }

    fn entry(op: &'static str, service: &str, account: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(service, account).map_err(|e| store_error(op, service, account, e))
    }
}

fn store_error(op: &'static str, service: &str, account: &str, e: keyring::Error) -> VaultError {
    VaultError::SecretStore {
        op,
        service: service.to_string(),
        account: account.to_string(),
        message: e.to_string(),
    }
}

impl SecretStore for KeyringStore {
    fn put(&self, service: &str, account: &str, value: &str) -> Result<()> {
        let entry = Self::entry("opening entry", service, account)?;
        entry
            .set_password(value)
            .map_err(|e| store_error("storing key", service, account, e))?;

        tracing::debug!(service, account, "stored vault key in keyring");
        Ok(())
    }

    fn get(&self, service: &str, account: &str) -> Result<Option<Zeroizing<String>>> {
        let entry = Self::entry("opening entry", service, account)?;

        match entry.get_password() {
            Ok(value) => Ok(Some(Zeroizing::new(value))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(store_error("reading key", service, account, e)),
        }
    }

    fn delete(&self, service: &str, account: &str) -> Result<bool> {
        let entry = Self::entry("opening entry", service, account)?;

        match entry.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(store_error("deleting key", service, account, e)),
        }
    }
}
