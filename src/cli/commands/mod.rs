//! One module per subcommand.  Each exposes an `execute` entry point.

pub mod completions;
pub mod delete;
pub mod recover;
pub mod rotate;
pub mod setup;
pub mod show;
pub mod status;
pub mod update;
