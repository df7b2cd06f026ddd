//! `zoho-invoice config show` — print stored credentials.
//!
//! On a fresh installation this falls through to the interactive setup
//! flow, the same way the API commands obtain their credentials.

use crate::cli::commands::setup::collect_setup_input;
use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `config show` command.
pub fn execute(cli: &Cli, reveal: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let credentials = vault.get_or_bootstrap(|| {
        output::info("No stored credentials found. Running first-time setup...");
        collect_setup_input()
    })?;

    output::print_credentials_table(&credentials, reveal);

    let missing = credentials.missing_required();
    if !missing.is_empty() {
        output::warning(&format!("Missing required fields: {}", missing.join(", ")));
        output::tip("Run `zoho-invoice config update` to add them.");
    }

    Ok(())
}
