use clap::Parser;
use satu_atap_availability::adapters::http;
use satu_atap_availability::adapters::memory::{InMemoryPropertyStore, InMemoryTtlCache};
use satu_atap_availability::config::{CliConfig, ServiceConfig};
use satu_atap_availability::core::AvailabilityService;
use satu_atap_availability::utils::{logger, validation::Validate};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting Satu Atap availability service");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match ServiceConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        None => ServiceConfig::default(),
    };

    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
    tracing::info!("✅ Configuration loaded and validated");

    let store = match config.seed_file() {
        Some(path) => match InMemoryPropertyStore::from_seed_file(path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("❌ Failed to load seed file '{}'", path);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("No seed file configured, starting with an empty property store");
            InMemoryPropertyStore::new()
        }
    };

    let cache = InMemoryTtlCache::new();
    let service = Arc::new(AvailabilityService::with_ttl_policy(
        store,
        cache,
        config.ttl_policy(),
    ));

    let addr = config.bind_address();
    tracing::info!("🌐 Serving availability API on {}", addr);
    http::serve(service, &addr, config.cors_allowed_origin()).await?;

    tracing::info!("✅ Availability service stopped cleanly");
    Ok(())
}
