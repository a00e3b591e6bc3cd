//! Command-line interface parsing for docli
//!
//! This module handles parsing of CLI arguments using clap and dispatching
//! each subcommand to the matching `ApiClient` resource method.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::{json, Map, Value};

use crate::api::{ApiClient, ApiError, CacheMode};
use crate::cache::ResponseCache;
use crate::config::TOKEN_ENV;
use crate::transport::Transport;

/// docli - Manage DigitalOcean droplets from the terminal
#[derive(Parser, Debug)]
#[command(name = "docli")]
#[command(about = "Cached command-line client for DigitalOcean droplets")]
#[command(version)]
pub struct Cli {
    /// Path to a config file (defaults to the XDG config location)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API token; overrides the config file
    #[arg(long, env = TOKEN_ENV, hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Ignore cached responses and refresh them from the API
    #[arg(long, global = true, conflicts_with = "cached")]
    pub refresh: bool,

    /// Use any cached response, even an expired one
    #[arg(long, global = true)]
    pub cached: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all droplets
    Droplets,
    /// Show a single droplet
    Droplet {
        /// Droplet id
        id: String,
    },
    /// Create a droplet (unset options fall back to configured defaults)
    Create(CreateArgs),
    /// Destroy a droplet
    Destroy {
        /// Droplet id
        id: String,
    },
    /// List images
    Images {
        /// Image type filter, e.g. distribution or application
        #[arg(long = "type", value_name = "TYPE")]
        image_type: Option<String>,
    },
    /// List regions
    Regions,
    /// List droplet sizes
    Sizes,
    /// List SSH keys on the account
    Keys,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    /// Droplet name
    #[arg(long)]
    pub name: String,
    /// Region slug
    #[arg(long)]
    pub region: Option<String>,
    /// Size slug
    #[arg(long)]
    pub size: Option<String>,
    /// Image slug or id
    #[arg(long)]
    pub image: Option<String>,
    /// Tag to apply (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// SSH key id or fingerprint (repeatable)
    #[arg(long = "ssh-key", value_name = "KEY")]
    pub ssh_keys: Vec<String>,
}

impl Cli {
    /// Cache policy selected by `--refresh` / `--cached`
    pub fn cache_mode(&self) -> CacheMode {
        if self.refresh {
            CacheMode::BypassCache
        } else if self.cached {
            CacheMode::UseCacheIfPresent
        } else {
            CacheMode::UseCacheOnlyIfFresh
        }
    }
}

impl CreateArgs {
    /// Request parameters for the options actually given on the command line
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("name".to_string(), Value::from(self.name.as_str()));
        for (key, value) in [
            ("region", &self.region),
            ("size", &self.size),
            ("image", &self.image),
        ] {
            if let Some(value) = value {
                params.insert(key.to_string(), Value::from(value.as_str()));
            }
        }
        if !self.tags.is_empty() {
            params.insert("tags".to_string(), Value::from(self.tags.clone()));
        }
        if !self.ssh_keys.is_empty() {
            params.insert("ssh_keys".to_string(), Value::from(self.ssh_keys.clone()));
        }
        params
    }
}

/// Runs `command` against `client` and returns the decoded payload to print
pub async fn execute<T, C>(
    client: &ApiClient<T, C>,
    command: &Command,
    mode: CacheMode,
) -> Result<Value, ApiError>
where
    T: Transport,
    C: ResponseCache,
{
    let output = match command {
        Command::Droplets => Value::from(client.get_droplets(mode).await?),
        Command::Droplet { id } => client.get_droplet(id, mode).await?.unwrap_or(Value::Null),
        Command::Create(args) => client
            .create_droplet(args.to_params())
            .await?
            .unwrap_or(Value::Null),
        Command::Destroy { id } => {
            client.destroy_droplet(id).await?;
            json!({ "destroyed": id })
        }
        Command::Images { image_type } => {
            Value::from(client.get_images(image_type.as_deref(), mode).await?)
        }
        Command::Regions => Value::from(client.get_regions(mode).await?),
        Command::Sizes => Value::from(client.get_sizes(mode).await?),
        Command::Keys => Value::from(client.get_keys(mode).await?),
    };
    Ok(output)
}
