use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vixia::app_log;
use vixia::{logging, start_web_server, ConfigManager};

#[derive(Parser)]
#[command(name = "vixia")]
#[command(about = "Vixia consultant marketplace API server")]
struct Cli {
    /// YAML config file. Defaults to ./config.yaml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured and environment port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
    logging::init(&environment)?;

    let mut config = ConfigManager::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    app_log!(info, "Environment: {}", config.environment);
    app_log!(info, "AI gateway: {}", config.gateway.base_url);
    app_log!(info, "Consultant source: {:?}", config.directory.source);

    start_web_server(config).await
}
