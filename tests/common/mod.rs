#![allow(dead_code)]

use rocket::local::asynchronous::Client;
use std::sync::Arc;
use std::time::Duration;

use vixia::dashboard::StaticProjects;
use vixia::directory::StaticDirectory;
use vixia::extraction::{ChatCompletionClient, CompletionClient, ProfileExtractor, SimulatedSubmitter};
use vixia::payment::{CheckoutService, SimulatedAuthorizer};
use vixia::{build_rocket, Services};

pub fn services(completions: Option<Arc<dyn CompletionClient>>, authorization_delay: Duration) -> Services {
    Services {
        consultants: Arc::new(StaticDirectory::builtin().unwrap()),
        projects: Arc::new(StaticProjects::builtin().unwrap()),
        extractor: ProfileExtractor::new(completions),
        checkout: CheckoutService::new(
            Arc::new(SimulatedAuthorizer::new(authorization_delay)),
            Duration::from_millis(20),
        ),
        applications: Arc::new(SimulatedSubmitter::new(Duration::from_millis(1))),
    }
}

pub fn gateway(base_url: &str) -> Arc<dyn CompletionClient> {
    Arc::new(
        ChatCompletionClient::new(
            base_url,
            "test-key",
            "google/gemini-3-flash-preview",
            0.05,
            Duration::from_secs(5),
        )
        .unwrap(),
    )
}

pub async fn client(services: Services) -> Client {
    Client::tracked(build_rocket(rocket::Config::figment(), services))
        .await
        .expect("valid rocket instance")
}
