//! srcloc CLI - serve component source lookups over HTTP
//!
//! `srcloc serve` starts the `/api/source` endpoint used by "view source"
//! developer tooling.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::serve::{run_serve, ServeArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(name = "srcloc", version, about = "Locate the source file that defines a UI component")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
    }
}
