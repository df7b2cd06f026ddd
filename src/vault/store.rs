//! High-level credential vault operations used by CLI commands.
//!
//! `CredentialVault` ties together the three pieces of the vault:
//! the salt + ciphertext files (`VaultFiles`), the derived key held in a
//! `SecretStore`, and the PBKDF2 parameters used to produce that key.
//!
//! State is never cached: every call reads the files and the secret store
//! afresh, so two commands run back to back always see each other's
//! writes.

use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive, derive_key, DerivedKey, KdfParams};
use crate::errors::{Result, VaultError};
use crate::secret_store::SecretStore;

use super::credentials::CredentialSet;
use super::files::{VaultFiles, APP_NAME};

/// Keyring account under which the derived key is stored.
pub const KEY_ACCOUNT: &str = "config_key";

/// Where a vault is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// No key in the secret store and no vault file.
    Uninitialized,
    /// Key present, no vault file yet.
    Initialized,
    /// Key present and vault file present.
    Populated,
    /// Vault file present but the key is gone from the secret store.
    /// `recover` with the original passphrase fixes this.
    Locked,
}

impl std::fmt::Display for VaultState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized (no credentials stored)",
            Self::Populated => "ready",
            Self::Locked => "locked (key missing from keyring)",
        };
        f.write_str(name)
    }
}

/// What the interactive setup flow hands back.
pub struct SetupInput {
    /// Confirmed passphrase, wiped on drop.
    pub passphrase: Zeroizing<String>,
    pub credentials: CredentialSet,
}

/// The vault handle.  Generic over where the derived key is kept.
pub struct CredentialVault<S: SecretStore> {
    files: VaultFiles,
    secrets: S,
    service: String,
    account: String,
    kdf: KdfParams,
}

impl<S: SecretStore> CredentialVault<S> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a vault handle using the default keyring entry
    /// (`zoho-invoice-manager` / `config_key`).
    pub fn new(files: VaultFiles, secrets: S, kdf: KdfParams) -> Self {
        Self {
            files,
            secrets,
            service: APP_NAME.to_string(),
            account: KEY_ACCOUNT.to_string(),
            kdf,
        }
    }

    /// Address a different secret store entry.
    pub fn with_entry(mut self, service: impl Into<String>, account: impl Into<String>) -> Self {
        self.service = service.into();
        self.account = account.into();
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Report the current lifecycle state.
    pub fn state(&self) -> Result<VaultState> {
        let has_key = self.secrets.get(&self.service, &self.account)?.is_some();
        let has_blob = self.files.exists();

        Ok(match (has_key, has_blob) {
            (false, false) => VaultState::Uninitialized,
            (true, false) => VaultState::Initialized,
            (true, true) => VaultState::Populated,
            (false, true) => VaultState::Locked,
        })
    }

    /// Derive a fresh key + salt from `passphrase`, persist the salt and
    /// park the key in the secret store.
    ///
    /// Refuses to run over an existing vault file, since the new key
    /// could never decrypt it.  Use `rotate` to change the passphrase of
    /// a populated vault.
    pub fn initialize(&self, passphrase: &str) -> Result<()> {
        if self.files.exists() {
            return Err(VaultError::AlreadyInitialized(
                self.files.blob_path().to_path_buf(),
            ));
        }

        self.files.ensure_dir()?;

        let (key, salt) = derive(passphrase.as_bytes(), None, &self.kdf)?;
        self.files.write_salt(&salt)?;
        self.put_key(&key)?;

        tracing::info!(dir = %self.files.dir().display(), "initialized credential vault");
        Ok(())
    }

    /// Encrypt `credentials` under the stored key and replace the vault file.
    pub fn store(&self, credentials: &CredentialSet) -> Result<()> {
        let key = self.fetch_key()?;
        self.write_credentials(&key, credentials)?;

        tracing::info!(fields = credentials.len(), "credentials stored");
        Ok(())
    }

    /// Decrypt and return the stored credentials.
    pub fn load(&self) -> Result<CredentialSet> {
        let blob = self.files.read_blob()?;
        let key = self.fetch_key()?;
        self.open_blob(&key, &blob)
    }

    /// Merge `partial` over the stored credentials.
    ///
    /// With no vault file yet, `partial` is stored as-is.
    pub fn update(&self, partial: &CredentialSet) -> Result<()> {
        match self.load() {
            Ok(mut current) => {
                current.merge(partial);
                self.store(&current)?;
                tracing::info!(changed = partial.len(), "credentials updated");
                Ok(())
            }
            Err(VaultError::VaultFileMissing(path)) => {
                tracing::debug!(path = %path.display(), "no vault file yet, storing update as-is");
                self.store(partial)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the vault file, the salt and the secret store entry.
    ///
    /// Safe to call repeatedly.
    pub fn delete(&self) -> Result<()> {
        self.files.delete()?;

        if !self.secrets.delete(&self.service, &self.account)? {
            tracing::warn!(
                service = %self.service,
                account = %self.account,
                "no vault key in secret store, nothing to remove"
            );
        }

        tracing::info!("credentials deleted");
        Ok(())
    }

    /// Run first-time setup with already-collected input.
    pub fn bootstrap(&self, input: SetupInput) -> Result<CredentialSet> {
        self.initialize(&input.passphrase)?;
        self.store(&input.credentials)?;
        Ok(input.credentials)
    }

    /// Load the credentials, running `setup` only if no vault file exists.
    ///
    /// Any other failure (missing key, wrong key, tampering) is returned
    /// untouched; re-prompting would hide it.
    pub fn get_or_bootstrap<F>(&self, setup: F) -> Result<CredentialSet>
    where
        F: FnOnce() -> Result<SetupInput>,
    {
        match self.load() {
            Err(VaultError::VaultFileMissing(path)) => {
                tracing::info!(path = %path.display(), "no stored credentials, running first-time setup");
                self.bootstrap(setup()?)
            }
            other => other,
        }
    }

    /// Re-encrypt the stored credentials under a key derived from
    /// `new_passphrase` with fresh salt.
    ///
    /// The new salt and vault file are written before the key is swapped
    /// in the secret store; if the process dies in between, `recover`
    /// with the new passphrase restores access.  If the vault file cannot
    /// be written, the previous salt is put back so the old passphrase
    /// still recovers the old vault file.
    pub fn rotate(&self, new_passphrase: &str) -> Result<()> {
        let credentials = self.load()?;
        let old_salt = self.files.read_salt()?;

        let (key, salt) = derive(new_passphrase.as_bytes(), None, &self.kdf)?;
        self.files.write_salt(&salt)?;
        if let Err(e) = self.write_credentials(&key, &credentials) {
            tracing::warn!(error = %e, "vault file write failed, restoring previous salt");
            self.files.write_salt(&old_salt)?;
            return Err(e);
        }
        self.put_key(&key)?;

        tracing::info!("vault key rotated");
        Ok(())
    }

    /// Rebuild the secret store entry from the passphrase and stored salt.
    ///
    /// The derived key is checked against the vault file before it is
    /// saved, so a wrong passphrase never replaces a working key.  The
    /// handle's `KdfParams` must match the ones the vault was written with.
    pub fn recover(&self, passphrase: &str) -> Result<()> {
        let blob = self.files.read_blob()?;
        let salt = self.files.read_salt()?;

        let key = derive_key(passphrase.as_bytes(), &salt, &self.kdf)?;
        // Only the authentication check matters here.
        drop(self.open_blob(&key, &blob)?);
        self.put_key(&key)?;

        tracing::info!("vault key recovered into secret store");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn files(&self) -> &VaultFiles {
        &self.files
    }

    /// The backing secret store.
    pub fn secret_store(&self) -> &S {
        &self.secrets
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn kdf_params(&self) -> KdfParams {
        self.kdf
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn fetch_key(&self) -> Result<DerivedKey> {
        let encoded = self
            .secrets
            .get(&self.service, &self.account)?
            .ok_or_else(|| VaultError::KeyNotFound {
                service: self.service.clone(),
                account: self.account.clone(),
            })?;
        DerivedKey::from_base64(&encoded)
    }

    fn put_key(&self, key: &DerivedKey) -> Result<()> {
        self.secrets
            .put(&self.service, &self.account, &key.to_base64())
    }

    fn write_credentials(&self, key: &DerivedKey, credentials: &CredentialSet) -> Result<()> {
        let plaintext = credentials.to_json()?;
        let blob = encrypt(key.as_bytes(), &plaintext)?;
        self.files.write_blob(&blob)
    }

    fn open_blob(&self, key: &DerivedKey, blob: &[u8]) -> Result<CredentialSet> {
        let plaintext = decrypt(key.as_bytes(), blob).map_err(|e| {
            tracing::debug!(error = %e, "vault file failed to decrypt");
            VaultError::DecryptionFailed(self.files.blob_path().to_path_buf())
        })?;
        CredentialSet::from_json(&plaintext)
    }
}
