//! `zoho-invoice config update` — change individual credential fields.

use crate::cli::output;
use crate::cli::{open_vault, Cli, UpdateArgs};
use crate::errors::Result;

/// Execute the `config update` command.
pub fn execute(cli: &Cli, args: &UpdateArgs) -> Result<()> {
    let partial = args.to_credentials();

    if partial.is_empty() {
        output::info("Nothing to update.");
        output::tip("Pass one or more of --organization-id, --client-id, --client-secret, --refresh-token, --default-customer-id.");
        return Ok(());
    }

    let vault = open_vault(cli)?;
    vault.update(&partial)?;

    let names: Vec<&str> = partial.iter().map(|(name, _)| name).collect();
    output::success(&format!("Updated {}", names.join(", ")));

    Ok(())
}
