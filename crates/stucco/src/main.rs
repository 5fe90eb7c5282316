//! # stucco
//!
//! Command-line entry point: transforms JSX component macros, injects HMR
//! records into compiled modules and prints the macro type declarations.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "stucco")]
#[command(about = "JSX component macros and HMR injection in Rust", long_about = None)]
#[command(version)]
struct Cli {
    /// Log resolved macros and injected components to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve JSX macros in .jsx/.tsx files (default command)
    #[command(visible_alias = "atelier")]
    Build(commands::build::BuildArgs),

    /// Inject HMR or SSR registration into a compiled module
    Hmr(commands::hmr::HmrArgs),

    /// Print the global type declarations for the configured aliases
    Types(commands::types::TypesArgs),
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(None);

    match cli.command {
        Some(Commands::Build(args)) => commands::build::run(args, &config),
        Some(Commands::Hmr(args)) => commands::hmr::run(args, &config),
        Some(Commands::Types(args)) => commands::types::run(args, &config),
        None => {
            // Default to build command with default args
            commands::build::run(commands::build::BuildArgs::default(), &config);
        }
    }
}
