use crate::config::toml_config::MoopConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "moop")]
#[command(about = "Search movies and browse cinema theaters")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API endpoint from the config file
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// Override the directory holding saved settings
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search movies by title
    Search { query: String },

    /// List theaters of all chains (CGV, Lotte Cinema, Megabox)
    Theaters {
        /// Print area groups instead of individual theaters
        #[arg(long)]
        areas: bool,
    },

    /// Show or replace the saved "my theaters" selection
    MyTheaters {
        /// Theaters to save as PROVIDER:CODE, comma separated (e.g. C:0056,M:1372)
        #[arg(long, value_delimiter = ',')]
        set: Vec<String>,
    },
}

impl CliConfig {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve(&self) -> Result<MoopConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                MoopConfig::from_file(path)?
            }
            None => MoopConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = Some(timeout);
        }

        config.validate()?;
        Ok(config)
    }
}
