use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};
use crate::vault::{VaultFiles, APP_NAME, KEY_ACCOUNT};

/// Per-installation configuration, loaded from `settings.toml` in the
/// config directory.
///
/// Every field has a sensible default so the tool works out-of-the-box
/// without any settings file at all.  Unknown keys are rejected; the PBKDF2
/// round count in particular is fixed and cannot be set here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Keyring service name holding the vault key.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Keyring account name holding the vault key.
    #[serde(default = "default_keyring_account")]
    pub keyring_account: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_keyring_service() -> String {
    APP_NAME.to_string()
}

fn default_keyring_account() -> String {
    KEY_ACCOUNT.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            keyring_account: default_keyring_account(),
        }
    }
}

impl Settings {
    /// Name of the settings file inside the config directory.
    const FILE_NAME: &'static str = "settings.toml";

    /// Load settings from `<config_dir>/settings.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| VaultError::FileIo {
                op: "read",
                path: config_path.clone(),
                source,
            })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the config directory: an explicit override wins, otherwise
    /// `<home>/.config/zoho-invoice-manager`.
    pub fn config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(dir) => Ok(dir.to_path_buf()),
            None => VaultFiles::default_dir(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
