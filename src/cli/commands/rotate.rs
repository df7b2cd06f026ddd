//! `zoho-invoice config rotate` — change the vault passphrase.
//!
//! Decrypts the credentials with the key from the keyring, derives a new
//! key from the new passphrase and fresh salt, and re-encrypts.

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_passphrase, Cli};
use crate::errors::Result;

/// Execute the `config rotate` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;

    // Fail before prompting if there is nothing to re-encrypt.
    vault.load()?;

    output::info("Choose your new master passphrase.");
    let passphrase = prompt_new_passphrase()?;
    vault.rotate(&passphrase)?;

    output::success("Passphrase rotated and credentials re-encrypted.");
    Ok(())
}
