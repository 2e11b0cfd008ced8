use clap::Parser;

use flex_reviews::cli::{Cli, Command};
use flex_reviews::{handle_serve, handle_sync};

fn main() {
    sensible_env_logger::init!();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve { port } => handle_serve(port),
        Command::Sync => handle_sync(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
