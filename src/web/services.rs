// src/web/services.rs
use anyhow::{Context, Result};
use std::sync::Arc;

use crate::app_log;
use crate::core::{ConfigManager, DirectorySource};
use crate::dashboard::{ProjectRepository, StaticProjects};
use crate::directory::{ConsultantRepository, StaticDirectory};
use crate::extraction::{
    ApplicationSubmitter, ChatCompletionClient, CompletionClient, ProfileExtractor, SimulatedSubmitter,
};
use crate::payment::{CheckoutService, SimulatedAuthorizer};

/// Everything the handlers reach through Rocket managed state.
#[derive(Clone)]
pub struct Services {
    pub consultants: Arc<dyn ConsultantRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub extractor: ProfileExtractor,
    pub checkout: CheckoutService,
    pub applications: Arc<dyn ApplicationSubmitter>,
}

impl Services {
    pub async fn from_config(config: &ConfigManager) -> Result<Self> {
        let consultants: Arc<dyn ConsultantRepository> = match config.directory.source {
            DirectorySource::Builtin => {
                Arc::new(StaticDirectory::builtin().context("Failed to load built-in consultants")?)
            }
            DirectorySource::Toml => {
                let path = config
                    .directory
                    .path
                    .as_deref()
                    .context("directory.path is not set")?;
                Arc::new(
                    StaticDirectory::from_toml_file(path)
                        .await
                        .with_context(|| format!("Failed to load consultants from {}", path.display()))?,
                )
            }
        };

        let projects = StaticProjects::builtin().context("Failed to load built-in projects")?;

        let completions: Option<Arc<dyn CompletionClient>> = match &config.gateway.api_key {
            Some(api_key) => Some(Arc::new(
                ChatCompletionClient::new(
                    config.gateway.base_url.clone(),
                    api_key.clone(),
                    config.gateway.model.clone(),
                    config.gateway.temperature,
                    config.gateway.timeout(),
                )
                .context("Failed to create AI gateway client")?,
            )),
            None => {
                app_log!(warn, "AI_GATEWAY_API_KEY not set, profile extraction disabled");
                None
            }
        };

        let authorizer = SimulatedAuthorizer::new(config.payment.authorization_delay());
        let idle_timeout = config.payment.session_idle_timeout();
        let checkout = CheckoutService::new(Arc::new(authorizer), config.payment.exit_delay())
            .with_idle_timeout(idle_timeout);
        checkout.spawn_sweeper(idle_timeout);

        Ok(Self {
            consultants,
            projects: Arc::new(projects),
            extractor: ProfileExtractor::new(completions)
                .with_max_input_chars(config.gateway.max_input_chars),
            checkout,
            applications: Arc::new(SimulatedSubmitter::default()),
        })
    }
}
