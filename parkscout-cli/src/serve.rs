//! The `serve` subcommand: provision the pool and run the HTTP server.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use parkscout_server::config::{DbSettings, LocalConfig};
use parkscout_server::db::create_pool;
use parkscout_server::{run_server, ServerConfig};
use tracing::info;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// TOML file with fallback connection values for TCP mode
    #[arg(long, default_value = "localconfig.toml")]
    pub config: PathBuf,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    // Pick up DB_* variables from a .env file when one is present.
    dotenvy::dotenv().ok();

    let local = LocalConfig::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    let settings = DbSettings::from_env(&local);
    info!(mode = settings.mode_name(), "database settings resolved");

    let pool = create_pool(&settings);

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
    };
    run_server(pool, config).await?;

    Ok(())
}
