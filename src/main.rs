use clap::Parser;
use stride::cli::commands::{Cli, Commands};
use stride::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        // Init is handled before session discovery
        Commands::Init(args) => {
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
