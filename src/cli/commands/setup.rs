//! `zoho-invoice config setup` — first-time credential setup.
//!
//! Prompts for a master passphrase (twice) and the Zoho API fields, then
//! initializes the vault and stores the encrypted credentials.

use dialoguer::{Input, Password};

use crate::cli::output;
use crate::cli::{confirm, open_vault, prompt_new_passphrase, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::{fields, CredentialSet, SetupInput};

/// Execute the `config setup` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let vault = open_vault(cli)?;

    // 1. Never silently orphan an existing vault file.
    if vault.files().exists() {
        if !force {
            output::tip("Use `zoho-invoice config update` to change individual fields.");
            return Err(VaultError::AlreadyInitialized(
                vault.files().blob_path().to_path_buf(),
            ));
        }
        if !confirm("Credentials already exist. Delete them and start over?")? {
            return Err(VaultError::UserCancelled);
        }
        vault.delete()?;
        output::info("Removed previous credentials.");
    }

    println!();
    println!("Zoho Invoice Manager - Credential Setup");
    println!("=======================================");

    // 2. Collect passphrase + fields, then initialize and store.
    let input = collect_setup_input()?;
    vault.bootstrap(input)?;

    output::success(&format!(
        "Credentials stored in {}",
        vault.files().dir().display()
    ));
    output::tip("Run `zoho-invoice config show` to review them.");

    Ok(())
}

/// Interactive setup flow: confirmed passphrase plus the credential fields.
///
/// Also used by `config show` when no credentials exist yet.
pub fn collect_setup_input() -> Result<SetupInput> {
    let passphrase = prompt_new_passphrase()?;

    let mut credentials = CredentialSet::new();
    credentials.insert(
        fields::ORGANIZATION_ID,
        required_input("Zoho Organization ID")?,
    );
    credentials.insert(fields::CLIENT_ID, required_input("Zoho Client ID")?);
    credentials.insert(fields::CLIENT_SECRET, secret_input("Zoho Client Secret")?);
    credentials.insert(fields::REFRESH_TOKEN, secret_input("Zoho Refresh Token")?);

    let default_customer: String = Input::new()
        .with_prompt("Default customer ID (optional, press Enter to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    let default_customer = default_customer.trim();
    if !default_customer.is_empty() {
        credentials.insert(fields::DEFAULT_CUSTOMER_ID, default_customer);
    }

    if let Some(missing) = credentials.missing_required().first() {
        return Err(VaultError::MissingField((*missing).to_string()));
    }

    Ok(SetupInput {
        passphrase,
        credentials,
    })
}

fn required_input(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|v: &String| {
            if v.trim().is_empty() {
                Err("this field is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_error)?;
    Ok(value.trim().to_string())
}

fn secret_input(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(e: dialoguer::Error) -> VaultError {
    VaultError::CommandFailed(format!("setup prompt: {e}"))
}
