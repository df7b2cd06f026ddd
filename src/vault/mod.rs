//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `CredentialSet` and the `ApiCredentials` view (`credentials`)
//! - Salt + ciphertext file layout (`files`)
//! - High-level `CredentialVault` lifecycle operations (`store`)

pub mod credentials;
pub mod files;
pub mod store;

// Re-export the most commonly used items.
pub use credentials::{fields, ApiCredentials, CredentialSet};
pub use files::{VaultFiles, APP_NAME};
pub use store::{CredentialVault, SetupInput, VaultState, KEY_ACCOUNT};
