// src/core/mod.rs
pub mod config_manager;

pub use config_manager::{
    ConfigManager, DirectoryConfig, DirectorySource, GatewayConfig, PaymentConfig, ServerConfig,
};
