//! onice CLI
//!
//! Runs the per-game on-ice reconstruction job and inspects its ledger

use clap::{Parser, Subcommand};
use onice_core::logging_facility::{self, Profile};

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "onice")]
#[command(about = "Reconstruct who was on the ice for every play of a game", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: settings::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, reconstruct and persist one game
    ProcessGame(commands::process_game::ProcessGameArgs),
    /// Print the ETL ledger status of a game
    Status(commands::status::StatusArgs),
    /// Create or upgrade the local store schema
    Migrate,
}

fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging_facility::init(cli.global.log_format.unwrap_or(Profile::Development));

    let result = settings::resolve(&cli.global).and_then(|config| match cli.command {
        Commands::ProcessGame(args) => commands::process_game::execute(args, &config),
        Commands::Status(args) => commands::status::execute(args, &config),
        Commands::Migrate => commands::migrate::execute(&config),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
