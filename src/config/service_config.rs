use crate::core::TtlPolicy;
use crate::utils::error::{AvailabilityError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// TOML file configuration. Every section and field is optional; accessors
/// fall back to the built-in defaults so an empty file is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub server: Option<ServerConfig>,
    pub cache: Option<CacheConfig>,
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_allowed_origin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub read_ttl_seconds: Option<u64>,
    pub update_ttl_seconds: Option<u64>,
    pub stats_ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    pub seed_file: Option<String>,
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AvailabilityError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AvailabilityError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value. Unset variables
    /// are left verbatim so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_range("server.port", self.port(), 1u16, 65_535u16)?;

        // "*" means any origin; anything else must be a real URL.
        let origin = self.cors_allowed_origin();
        if origin != "*" {
            crate::utils::validation::validate_url("server.cors_allowed_origin", origin)?;
        }

        crate::utils::validation::validate_range(
            "cache.read_ttl_seconds",
            self.read_ttl_seconds(),
            1,
            86_400,
        )?;
        crate::utils::validation::validate_range(
            "cache.update_ttl_seconds",
            self.update_ttl_seconds(),
            1,
            86_400,
        )?;
        crate::utils::validation::validate_range(
            "cache.stats_ttl_seconds",
            self.stats_ttl_seconds(),
            1,
            86_400,
        )?;

        if let Some(seed_file) = self.seed_file() {
            crate::utils::validation::validate_path("store.seed_file", seed_file)?;
            crate::utils::validation::validate_file_extensions(
                "store.seed_file",
                &[seed_file.to_string()],
                &["json"],
            )?;
        }

        Ok(())
    }

    pub fn host(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.host.as_deref())
            .unwrap_or("0.0.0.0")
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(8080)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    pub fn cors_allowed_origin(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.cors_allowed_origin.as_deref())
            .unwrap_or("*")
    }

    pub fn read_ttl_seconds(&self) -> u64 {
        self.cache
            .as_ref()
            .and_then(|c| c.read_ttl_seconds)
            .unwrap_or(300)
    }

    pub fn update_ttl_seconds(&self) -> u64 {
        self.cache
            .as_ref()
            .and_then(|c| c.update_ttl_seconds)
            .unwrap_or(1800)
    }

    pub fn stats_ttl_seconds(&self) -> u64 {
        self.cache
            .as_ref()
            .and_then(|c| c.stats_ttl_seconds)
            .unwrap_or(600)
    }

    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy {
            read: Duration::from_secs(self.read_ttl_seconds()),
            manual_update: Duration::from_secs(self.update_ttl_seconds()),
            stats: Duration::from_secs(self.stats_ttl_seconds()),
        }
    }

    pub fn seed_file(&self) -> Option<&str> {
        self.store.as_ref().and_then(|s| s.seed_file.as_deref())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
