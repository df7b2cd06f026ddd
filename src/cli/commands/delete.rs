//! `zoho-invoice config delete` — remove credentials, salt and vault key.

use crate::cli::output;
use crate::cli::{confirm, open_vault, Cli};
use crate::errors::Result;

/// Execute the `config delete` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm("Are you sure you want to delete all stored credentials?")? {
        output::info("Cancelled.");
        return Ok(());
    }

    let vault = open_vault(cli)?;
    vault.delete()?;

    output::success("Credentials deleted.");
    Ok(())
}
