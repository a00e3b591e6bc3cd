//! docli - Manage DigitalOcean droplets from the terminal
//!
//! Prints each command's decoded JSON payload to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docli::cli::{self, Cli};
use docli::{ApiClient, Config, ReqwestTransport};

/// Installs the stderr log subscriber; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "docli=warn",
        1 => "docli=debug",
        _ => "docli=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_token_override(cli.token.clone());
    let token = config.token()?;
    let cache = config
        .cache_manager()
        .context("Failed to set up response cache")?;

    let client = ApiClient::new(token, ReqwestTransport::new(), cache)
        .with_endpoints(config.endpoints())
        .with_defaults(config.droplet_defaults.clone());

    let output = cli::execute(&client, &cli.command, cli.cache_mode()).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
