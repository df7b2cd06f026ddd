//! CLI module — Clap argument parser, prompts, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::KdfParams;
use crate::errors::{Result, VaultError};
use crate::secret_store::KeyringStore;
use crate::vault::{fields, CredentialSet, CredentialVault, VaultFiles};

/// Minimum passphrase length to prevent trivially weak passphrases.
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// Environment variable that supplies the passphrase non-interactively.
pub const PASSPHRASE_ENV: &str = "ZOHO_INVOICE_PASSPHRASE";

/// Zoho Invoice command-line client.
#[derive(Parser)]
#[command(
    name = "zoho-invoice",
    about = "Zoho Invoice command-line client with an encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (default: ~/.config/zoho-invoice-manager)
    #[arg(long, env = "ZOHO_INVOICE_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Manage stored API credentials
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Credential vault subcommands.
#[derive(clap::Subcommand)]
pub enum ConfigAction {
    /// Set up new credentials (interactive)
    Setup {
        /// Replace an existing vault after confirmation
        #[arg(long)]
        force: bool,
    },

    /// Update specific credentials
    Update(UpdateArgs),

    /// Delete all stored credentials and the vault key
    Delete {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show stored credentials (runs setup on first use)
    Show {
        /// Print values instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Show vault state and file locations
    Status,

    /// Change the vault passphrase and re-encrypt credentials
    Rotate,

    /// Restore the vault key into the keyring from the passphrase
    Recover,
}

/// Fields accepted by `config update`.  Any subset may be given.
#[derive(clap::Args, Debug, Default)]
pub struct UpdateArgs {
    /// Update organization ID
    #[arg(long)]
    pub organization_id: Option<String>,

    /// Update client ID
    #[arg(long)]
    pub client_id: Option<String>,

    /// Update client secret
    #[arg(long)]
    pub client_secret: Option<String>,

    /// Update refresh token
    #[arg(long)]
    pub refresh_token: Option<String>,

    /// Update default customer ID
    #[arg(long)]
    pub default_customer_id: Option<String>,
}

impl UpdateArgs {
    /// Collect the flags that were actually passed.
    pub fn to_credentials(&self) -> CredentialSet {
        [
            (fields::ORGANIZATION_ID, &self.organization_id),
            (fields::CLIENT_ID, &self.client_id),
            (fields::CLIENT_SECRET, &self.client_secret),
            (fields::REFRESH_TOKEN, &self.refresh_token),
            (fields::DEFAULT_CUSTOMER_ID, &self.default_customer_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.to_string()))
        })
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build the vault handle from CLI flags and `settings.toml`.
pub fn open_vault(cli: &Cli) -> Result<CredentialVault<KeyringStore>> {
    let dir = Settings::config_dir(cli.config_dir.as_deref())?;
    let settings = Settings::load(&dir)?;

    tracing::debug!(dir = %dir.display(), "using config directory");

    Ok(CredentialVault::new(
        VaultFiles::new(dir),
        KeyringStore::new(),
        KdfParams::default(),
    )
    .with_entry(settings.keyring_service, settings.keyring_account))
}

/// Get the vault passphrase, trying in order:
/// 1. `ZOHO_INVOICE_PASSPHRASE` env var
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase twice and check that both entries agree.
///
/// Too-short passphrases are re-prompted; a mismatch aborts with
/// `PassphraseMismatch`.  Also respects `ZOHO_INVOICE_PASSPHRASE`.
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        check_new_passphrase(&pw, &pw)?;
        return Ok(pw);
    }

    loop {
        let first = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Enter a master passphrase to encrypt your credentials")
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("passphrase prompt: {e}")))?,
        );
        let second = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Confirm master passphrase")
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("passphrase prompt: {e}")))?,
        );

        match check_new_passphrase(&first, &second) {
            Ok(()) => return Ok(first),
            Err(VaultError::WeakPassphrase(min)) => {
                output::warning(&format!(
                    "Passphrase must be at least {min} characters. Try again."
                ));
            }
            Err(e) => return Err(e),
        }
    }
}

/// Validate a new passphrase and its confirmation.
///
/// The comparison is constant-time.
pub fn check_new_passphrase(passphrase: &str, confirmation: &str) -> Result<()> {
    if !bool::from(passphrase.as_bytes().ct_eq(confirmation.as_bytes())) {
        return Err(VaultError::PassphraseMismatch);
    }
    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        return Err(VaultError::WeakPassphrase(MIN_PASSPHRASE_LEN));
    }
    Ok(())
}

/// Ask a yes/no question (defaults to "no").
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))
}

fn passphrase_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn matching_passphrases_pass() {
        assert!(check_new_passphrase("correct horse", "correct horse").is_ok());
    }

    #[test]
    fn mismatched_passphrases_are_rejected() {
        assert!(matches!(
            check_new_passphrase("correct horse", "correct house"),
            Err(VaultError::PassphraseMismatch)
        ));
    }

    #[test]
    fn mismatch_is_reported_before_length() {
        assert!(matches!(
            check_new_passphrase("abc", "abd"),
            Err(VaultError::PassphraseMismatch)
        ));
    }

    #[test]
    fn short_passphrase_is_rejected() {
        assert!(matches!(
            check_new_passphrase("short", "short"),
            Err(VaultError::WeakPassphrase(MIN_PASSPHRASE_LEN))
        ));
    }

    #[test]
    fn update_args_keep_only_given_flags() {
        let args = UpdateArgs {
            client_id: Some("1000.NEW".into()),
            refresh_token: Some("1000.tok".into()),
            ..UpdateArgs::default()
        };
        let creds = args.to_credentials();
        assert_eq!(creds.len(), 2);
        assert_eq!(creds.get(fields::CLIENT_ID), Some("1000.NEW"));
        assert!(!creds.contains(fields::ORGANIZATION_ID));
    }

    #[test]
    fn update_args_skip_empty_values() {
        let args = UpdateArgs {
            organization_id: Some(String::new()),
            ..UpdateArgs::default()
        };
        assert!(args.to_credentials().is_empty());
    }

    #[test]
    fn parses_update_flags() {
        let cli = Cli::parse_from([
            "zoho-invoice",
            "config",
            "update",
            "--client-secret",
            "s3cr3t",
            "--default-customer-id",
            "42",
        ]);
        match cli.command {
            Commands::Config {
                action: ConfigAction::Update(args),
            } => {
                let creds = args.to_credentials();
                assert_eq!(creds.get(fields::CLIENT_SECRET), Some("s3cr3t"));
                assert_eq!(creds.get(fields::DEFAULT_CUSTOMER_ID), Some("42"));
            }
            _ => panic!("expected config update"),
        }
    }

    #[test]
    fn open_vault_uses_fixed_kdf_cost_and_configured_entry() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("settings.toml"),
            "keyring_service = \"zoho-invoice-test\"\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            OsString::from("zoho-invoice"),
            OsString::from("--config-dir"),
            tmp.path().as_os_str().to_os_string(),
            OsString::from("config"),
            OsString::from("status"),
        ]);
        let vault = open_vault(&cli).unwrap();

        assert_eq!(vault.kdf_params(), KdfParams::default());
        assert_eq!(vault.service(), "zoho-invoice-test");
        assert_eq!(vault.files().dir(), tmp.path());
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::parse_from(["zoho-invoice", "-vv", "config", "status"]);
        assert_eq!(cli.verbose, 2);
    }
}
