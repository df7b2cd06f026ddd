//! On-disk layout of the vault.
//!
//! ```text
//! <config-dir>/
//!   salt        16 raw bytes, not secret
//!   config.enc  [12-byte nonce | AES-256-GCM ciphertext + tag]
//! ```
//!
//! Writes go through a temp file in the same directory followed by a
//! rename, so a crash never leaves a half-written blob behind.  On Unix
//! both files are `0600`, and a directory created here is `0700`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::crypto::kdf::Salt;
use crate::errors::{Result, VaultError};

/// Application name, used for the config directory and keyring service.
pub const APP_NAME: &str = "zoho-invoice-manager";

const SALT_FILE: &str = "salt";
const BLOB_FILE: &str = "config.enc";

/// Paths of the salt and ciphertext files inside one config directory.
#[derive(Debug, Clone)]
pub struct VaultFiles {
    dir: PathBuf,
    salt_path: PathBuf,
    blob_path: PathBuf,
}

impl VaultFiles {
    /// Use `dir` as the vault directory.  Nothing is created yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            salt_path: dir.join(SALT_FILE),
            blob_path: dir.join(BLOB_FILE),
            dir,
        }
    }

    /// `<home>/.config/zoho-invoice-manager`
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            VaultError::ConfigError("cannot determine the home directory".into())
        })?;
        Ok(home.join(".config").join(APP_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn salt_path(&self) -> &Path {
        &self.salt_path
    }

    pub fn blob_path(&self) -> &Path {
        &self.blob_path
    }

    /// Create the vault directory (and parents) if it does not exist.
    ///
    /// Only a directory created here is restricted to `0700`; an existing
    /// one keeps its permissions.
    pub fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.dir).map_err(|e| file_error("create directory", &self.dir, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700))
                .map_err(|e| file_error("restrict permissions on", &self.dir, e))?;
        }

        tracing::debug!(path = %self.dir.display(), "created vault directory");
        Ok(())
    }

    pub fn write_salt(&self, salt: &Salt) -> Result<()> {
        self.ensure_dir()?;
        write_atomic(&self.salt_path, salt)?;
        tracing::debug!(path = %self.salt_path.display(), "wrote salt");
        Ok(())
    }

    /// Read the salt back, byte for byte.
    pub fn read_salt(&self) -> Result<Salt> {
        let data = match fs::read(&self.salt_path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(VaultError::SaltMissing(self.salt_path.clone()));
            }
            Err(e) => return Err(file_error("read", &self.salt_path, e)),
        };

        let salt: Salt = data
            .as_slice()
            .try_into()
            .map_err(|_| VaultError::CorruptSalt {
                path: self.salt_path.clone(),
                len: data.len(),
            })?;
        Ok(salt)
    }

    pub fn salt_exists(&self) -> bool {
        self.salt_path.is_file()
    }

    pub fn write_blob(&self, blob: &[u8]) -> Result<()> {
        self.ensure_dir()?;
        write_atomic(&self.blob_path, blob)?;
        tracing::debug!(path = %self.blob_path.display(), bytes = blob.len(), "wrote vault file");
        Ok(())
    }

    pub fn read_blob(&self) -> Result<Vec<u8>> {
        match fs::read(&self.blob_path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VaultError::VaultFileMissing(self.blob_path.clone()))
            }
            Err(e) => Err(file_error("read", &self.blob_path, e)),
        }
    }

    /// Whether the encrypted credentials file exists.
    pub fn exists(&self) -> bool {
        self.blob_path.is_file()
    }

    /// Remove both files.  Files that are already gone are not an error.
    ///
    /// The directory itself is left in place.
    pub fn delete(&self) -> Result<()> {
        for path in [&self.blob_path, &self.salt_path] {
            match fs::remove_file(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(file_error("remove", path, e)),
            }
        }
        Ok(())
    }
}

fn file_error(op: &'static str, path: &Path, source: io::Error) -> VaultError {
    VaultError::FileIo {
        op,
        path: path.to_path_buf(),
        source,
    }
}

/// Write `data` to a sibling temp file, restrict it, then rename over `path`.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, data).map_err(|e| file_error("write", &tmp_path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))
            .map_err(|e| file_error("restrict permissions on", &tmp_path, e))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| file_error("replace", path, e))?;
    Ok(())
}
