use clap::Parser;
use zoho_invoice::cli::commands;
use zoho_invoice::cli::{Cli, Commands, ConfigAction};

fn main() {
    let cli = Cli::parse();

    zoho_invoice::logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Config { ref action } => match action {
            ConfigAction::Setup { force } => commands::setup::execute(&cli, *force),
            ConfigAction::Update(args) => commands::update::execute(&cli, args),
            ConfigAction::Delete { force } => commands::delete::execute(&cli, *force),
            ConfigAction::Show { reveal } => commands::show::execute(&cli, *reveal),
            ConfigAction::Status => commands::status::execute(&cli),
            ConfigAction::Rotate => commands::rotate::execute(&cli),
            ConfigAction::Recover => commands::recover::execute(&cli),
        },
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        zoho_invoice::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
