//! `zoho-invoice config status` — report vault state without decrypting.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::VaultState;

/// Execute the `config status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    let state = vault.state()?;

    output::info(&format!("Vault: {state}"));
    output::info(&format!("Directory: {}", vault.files().dir().display()));
    output::info(&format!(
        "Keyring entry: {}/{}",
        vault.service(),
        vault.account()
    ));

    match state {
        VaultState::Uninitialized | VaultState::Initialized => {
            output::tip("Run `zoho-invoice config setup` to store credentials.");
        }
        VaultState::Locked => {
            output::tip("Run `zoho-invoice config recover` with your passphrase to restore the key.");
        }
        VaultState::Populated => {}
    }

    Ok(())
}
