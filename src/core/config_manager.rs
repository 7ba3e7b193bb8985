// src/core/config_manager.rs
//! Service configuration: optional `config.yaml`, then environment overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::extraction::gateway::{DEFAULT_GATEWAY_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::extraction::prompt::DEFAULT_MAX_INPUT_CHARS;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigManager {
    #[serde(skip)]
    pub environment: String,
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub payment: PaymentConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
    pub max_input_chars: usize,
    /// Only ever read from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: 60,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            api_key: None,
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub authorization_delay_ms: u64,
    pub exit_delay_ms: u64,
    pub session_idle_timeout_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            authorization_delay_ms: 2000,
            exit_delay_ms: 300,
            session_idle_timeout_ms: 30 * 60 * 1000,
        }
    }
}

impl PaymentConfig {
    pub fn authorization_delay(&self) -> Duration {
        Duration::from_millis(self.authorization_delay_ms)
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.session_idle_timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySource {
    #[default]
    Builtin,
    Toml,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub source: DirectorySource,
    pub path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load `path`, or `config.yaml` from the working directory when present,
    /// then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        info!(
            "Configuration loaded for environment: {}",
            config.environment
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Environment wins over the file. `lookup` is injectable for tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.environment = lookup("ENVIRONMENT").unwrap_or_else(|| "local".to_string());

        if let Some(port) = lookup("PORT").or_else(|| lookup("ROCKET_PORT")) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Port must be a valid port number, got '{}'", port))?;
        }
        if let Some(url) = lookup("AI_GATEWAY_URL") {
            self.gateway.base_url = url;
        }
        if let Some(model) = lookup("AI_GATEWAY_MODEL") {
            self.gateway.model = model;
        }
        self.gateway.api_key = lookup("AI_GATEWAY_API_KEY").filter(|key| !key.trim().is_empty());

        self.validate()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    fn validate(&self) -> Result<()> {
        if self.directory.source == DirectorySource::Toml && self.directory.path.is_none() {
            anyhow::bail!("directory.path is required when directory.source is 'toml'");
        }
        if !(0.0..=2.0).contains(&self.gateway.temperature) {
            anyhow::bail!(
                "gateway.temperature must be between 0 and 2, got {}",
                self.gateway.temperature
            );
        }
        if self.gateway.max_input_chars == 0 {
            anyhow::bail!("gateway.max_input_chars must be positive");
        }
        if self.payment.session_idle_timeout_ms == 0 {
            anyhow::bail!("payment.session_idle_timeout_ms must be positive");
        }
        Ok(())
    }
}
