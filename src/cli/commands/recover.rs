//! `zoho-invoice config recover` — restore the vault key into the keyring.
//!
//! Needed when the keyring entry was lost (new login keychain, wiped
//! secret service) but `salt` and `config.enc` are still on disk.

use crate::cli::output;
use crate::cli::{open_vault, prompt_passphrase, Cli};
use crate::errors::Result;

/// Execute the `config recover` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;

    let passphrase = prompt_passphrase("Enter your master passphrase")?;
    vault.recover(&passphrase)?;

    output::success("Vault key restored to the system keyring.");
    Ok(())
}
