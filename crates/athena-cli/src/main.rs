//! Athena CLI
//!
//! Command-line host for the Athena extraction engine. Documents are read
//! from JSON dumps of a design file.

use athena_core::logging_facility::{init, Profile};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "athena")]
#[command(about = "Athena - design library component export", long_about = None)]
struct Cli {
    /// TOML file layered over the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export components (structure and variant patches) as JSON
    Export(commands::export::ExportArgs),
    /// Export local variables as design tokens
    Tokens(commands::tokens::TokensArgs),
    /// Export local effect, text and paint styles
    Styles(commands::styles::StylesArgs),
    /// Speak the UI message protocol as JSON lines on stdin/stdout
    Serve(commands::serve::ServeArgs),
    /// Print the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Export(args) => commands::export::execute(args, &config),
        Commands::Tokens(args) => commands::tokens::execute(args, &config),
        Commands::Styles(args) => commands::styles::execute(args),
        Commands::Serve(args) => commands::serve::execute(args, &config),
        Commands::Config => commands::print_config(&config),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
