use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use zeroize::Zeroizing;

use super::SecretStore;
use crate::errors::{Result, VaultError};

type Entries = HashMap<(String, String), Zeroizing<String>>;

/// In-process secret store.
///
/// Nothing survives the process, so this is only useful for tests and
/// for callers that manage key custody themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>> {
        self.entries.lock().map_err(|_| VaultError::SecretStore {
            op: "locking memory store",
            service: String::new(),
            account: String::new(),
            message: "lock poisoned".into(),
        })
    }
}

impl SecretStore for MemoryStore {
    fn put(&self, service: &str, account: &str, value: &str) -> Result<()> {
        self.lock()?.insert(
            (service.to_string(), account.to_string()),
            Zeroizing::new(value.to_string()),
        );
        Ok(())
    }

    fn get(&self, service: &str, account: &str) -> Result<Option<Zeroizing<String>>> {
        Ok(self
            .lock()?
            .get(&(service.to_string(), account.to_string()))
            .cloned())
    }

    fn delete(&self, service: &str, account: &str) -> Result<bool> {
        Ok(self
            .lock()?
            .remove(&(service.to_string(), account.to_string()))
            .is_some())
    }
}
