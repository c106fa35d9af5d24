use clap::Parser;
use td::cli::commands::Cli;
use td::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // No subcommand → interactive menu
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
