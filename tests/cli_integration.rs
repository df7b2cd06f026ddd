//! Integration tests for the zoho-invoice CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Anything that would reach the OS keyring or an interactive prompt is
//! out of reach here, so we focus on argument handling and the paths
//! that fail before the keyring is consulted.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the zoho-invoice binary.
fn zoho_invoice() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("zoho-invoice").expect("binary should exist");
    cmd.env_remove("ZOHO_INVOICE_CONFIG_DIR")
        .env_remove("ZOHO_INVOICE_PASSPHRASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    zoho_invoice()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encrypted credential vault"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    zoho_invoice()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zoho-invoice"));
}

#[test]
fn no_args_shows_help() {
    zoho_invoice()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn config_help_lists_subcommands() {
    zoho_invoice()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("rotate"))
        .stdout(predicate::str::contains("recover"));
}

#[test]
fn update_help_lists_field_flags() {
    zoho_invoice()
        .args(["config", "update", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--organization-id"))
        .stdout(predicate::str::contains("--client-id"))
        .stdout(predicate::str::contains("--client-secret"))
        .stdout(predicate::str::contains("--refresh-token"))
        .stdout(predicate::str::contains("--default-customer-id"));
}

#[test]
fn update_without_flags_is_a_no_op() {
    let tmp = TempDir::new().unwrap();

    zoho_invoice()
        .args(["config", "update", "--config-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to update"));

    tmp.child("config.enc").assert(predicate::path::missing());
}

#[test]
fn setup_refuses_existing_vault_without_force() {
    let tmp = TempDir::new().unwrap();
    tmp.child("config.enc").write_binary(&[0u8; 40]).unwrap();

    zoho_invoice()
        .args(["config", "setup"])
        .env("ZOHO_INVOICE_CONFIG_DIR", tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already stored"));

    // The existing file is left alone.
    tmp.child("config.enc").assert(predicate::path::exists());
}

#[test]
fn recover_without_vault_file_fails() {
    let tmp = TempDir::new().unwrap();

    zoho_invoice()
        .args(["config", "recover", "--config-dir"])
        .arg(tmp.path())
        .env("ZOHO_INVOICE_PASSPHRASE", "correct horse battery")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No stored credentials"));
}

#[test]
fn malformed_settings_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    tmp.child("settings.toml")
        .write_str("keyring_service = 5")
        .unwrap();

    zoho_invoice()
        .args(["config", "recover", "--config-dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("settings.toml"));
}

#[test]
fn kdf_iterations_setting_is_rejected() {
    let tmp = TempDir::new().unwrap();
    tmp.child("settings.toml")
        .write_str("kdf_iterations = 20000\n")
        .unwrap();

    zoho_invoice()
        .args(["config", "recover", "--config-dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("kdf_iterations"));
}

#[test]
fn completions_for_bash() {
    zoho_invoice()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zoho-invoice"));
}

#[test]
fn completions_reject_unknown_shell() {
    zoho_invoice().args(["completions", "csh"]).assert().failure();
}
