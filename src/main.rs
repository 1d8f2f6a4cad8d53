//! Main entry point for dumpdiff CLI

use clap::Parser;
use dumpdiff::cli::{normalize_args, Cli};
use dumpdiff::commands::execute;
use dumpdiff::Config;

fn main() {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Parse command line arguments, accepting the legacy `-mode` and `-?` spellings
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // Set up verbose logging if requested
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let config = match Config::try_from(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = execute(&config, &mut out) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
