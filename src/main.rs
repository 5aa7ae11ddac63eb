use clap::Parser;

use quorum::cli::{check, run, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() {
    // Load .env if present; real environments set vars directly.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Match(args) => run::execute_match(args).await,
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
