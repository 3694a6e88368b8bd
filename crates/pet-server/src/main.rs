use clap::Parser;

use pet_config::PetConfig;
use pet_server::cli::{Cli, Commands};
use pet_server::commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("petfamily error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = PetConfig::load_with_dotenv()?;

    match cli.command.unwrap_or_default() {
        Commands::Serve(args) => commands::serve(&args, config).await,
        Commands::Import(args) => commands::import(&args, config).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PETFAMILY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
