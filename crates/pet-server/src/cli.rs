use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `petfamily` binary.
#[derive(Debug, Parser)]
#[command(name = "petfamily", version, about = "Pet health decision-support backend")]
pub struct Cli {
    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Load enriched disease records into the decision graph.
    Import(ImportArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Serve(ServeArgs::default())
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides `server.port`)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database path or libSQL URL (overrides `database.url`)
    #[arg(long)]
    pub database_url: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// JSON array of enriched disease records
    pub file: PathBuf,

    /// Database path or libSQL URL (overrides `database.url`)
    #[arg(long)]
    pub database_url: Option<String>,
}
