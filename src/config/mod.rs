pub mod service_config;

pub use service_config::ServiceConfig;

use clap::Parser;
use serde::{Deserialize, Serialize};
use service_config::{ServerConfig, StoreConfig};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "satu-atap-availability")]
#[command(about = "Room-availability API for the Satu Atap kost marketplace")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bind host, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overriding the config file
    #[arg(long)]
    pub port: Option<u16>,

    /// JSON file with the initial property records
    #[arg(long)]
    pub seed_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines instead of human-readable output")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Folds the command-line overrides into the file configuration.
    pub fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            let server = config.server.get_or_insert_with(ServerConfig::default);
            server.host = Some(host.clone());
        }
        if let Some(port) = self.port {
            let server = config.server.get_or_insert_with(ServerConfig::default);
            server.port = Some(port);
        }
        if let Some(seed_file) = &self.seed_file {
            let store = config.store.get_or_insert_with(StoreConfig::default);
            store.seed_file = Some(seed_file.clone());
        }
    }
}
