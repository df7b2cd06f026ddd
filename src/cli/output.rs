//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialSet;

/// Number of leading characters left visible by `mask_value`.
const VISIBLE_PREFIX: usize = 4;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Hide all but the first few characters of a credential value.
pub fn mask_value(value: &str) -> String {
    if value.chars().count() <= VISIBLE_PREFIX * 2 {
        return "********".to_string();
    }
    let prefix: String = value.chars().take(VISIBLE_PREFIX).collect();
    format!("{prefix}********")
}

/// Print a table of credential fields (Field, Value).
pub fn print_credentials_table(credentials: &CredentialSet, reveal: bool) {
    if credentials.is_empty() {
        info("No credentials stored yet.");
        tip("Run `zoho-invoice config setup` to add them.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    for (name, value) in credentials.iter() {
        let shown = if reveal {
            value.to_string()
        } else {
            mask_value(value)
        };
        table.add_row(vec![name.to_string(), shown]);
    }

    println!("{table}");
}
