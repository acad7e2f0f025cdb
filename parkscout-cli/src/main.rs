//! parkscout CLI - location API server for parking, places, and
//! notifications

use anyhow::Result;
use clap::{Parser, Subcommand};

mod serve;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "parkscout",
    author,
    version,
    about = "Location API server for nearby parking, places, and notifications"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init_tracing(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
    }
}
