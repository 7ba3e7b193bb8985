// src/extraction/flow.rs
//! Consultant application form: paste profile text, let the extraction
//! service fill the fields, edit, submit.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::extractor::MIN_PROFILE_TEXT_CHARS;
use crate::app_log;
use crate::notice::Notice;
use crate::types::response::{ExtractProfileEnvelope, ExtractProfileRequest};
use crate::types::ConsultantProfile;
use crate::utils::char_len;

const EXTRACTION_FALLBACK: &str = "Could not extract profile. Try entering details manually.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with an error message of its own.
    #[error("{0}")]
    Rejected(String),

    #[error("Extraction service returned status {0}")]
    Status(u16),

    #[error("Failed to reach extraction service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed extraction response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait ExtractionClient: Send + Sync {
    async fn extract(&self, profile_text: &str) -> Result<ExtractProfileEnvelope, ClientError>;
}

/// Talks to a `POST {profileText}` extraction endpoint.
pub struct HttpExtractionClient {
    client: Client,
    endpoint: String,
}

impl HttpExtractionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ExtractionClient for HttpExtractionClient {
    async fn extract(&self, profile_text: &str) -> Result<ExtractProfileEnvelope, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExtractProfileRequest {
                profile_text: Some(profile_text.to_string()),
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ExtractProfileEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error);
            return Err(match message {
                Some(message) => ClientError::Rejected(message),
                None => ClientError::Status(status.as_u16()),
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Application rejected: {0}")]
    Rejected(String),

    #[error("Application service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ApplicationSubmitter: Send + Sync {
    async fn submit(&self, profile: &ConsultantProfile) -> Result<(), SubmissionError>;
}

/// Accepts every application after a short wait. Nothing is stored.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl ApplicationSubmitter for SimulatedSubmitter {
    async fn submit(&self, profile: &ConsultantProfile) -> Result<(), SubmissionError> {
        app_log!(
            info,
            "Received application for {}",
            profile.name.as_deref().unwrap_or("<unnamed>")
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Result of trying to start an async step.
#[derive(Debug, Clone, PartialEq)]
pub enum Start<T> {
    /// Go ahead with this payload, then report back.
    Send(T),
    Rejected(Notice),
    /// The same step is already running.
    Busy,
}

pub fn missing_information() -> Notice {
    Notice::destructive(
        "Missing Information",
        "Please fill in your name, title, and location.",
    )
}

#[derive(Debug, Clone, Default)]
pub struct ProfileExtractionFlow {
    profile_text: String,
    profile: ConsultantProfile,
    extracted: bool,
    extracting: bool,
    submitting: bool,
}

impl ProfileExtractionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.profile_text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.profile_text
    }

    pub fn profile(&self) -> &ConsultantProfile {
        &self.profile
    }

    /// Manual edits go straight into the model.
    pub fn profile_mut(&mut self) -> &mut ConsultantProfile {
        &mut self.profile
    }

    pub fn is_extracted(&self) -> bool {
        self.extracted
    }

    pub fn is_extracting(&self) -> bool {
        self.extracting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin_extraction(&mut self) -> Start<String> {
        if self.extracting {
            return Start::Busy;
        }
        if char_len(self.profile_text.trim()) < MIN_PROFILE_TEXT_CHARS {
            return Start::Rejected(Notice::destructive(
                "Too short",
                "Please paste more content from your LinkedIn profile.",
            ));
        }

        self.extracting = true;
        self.extracted = false;
        Start::Send(self.profile_text.clone())
    }

    /// The profile is replaced only on a successful envelope carrying an
    /// object; any other outcome leaves it as it was.
    pub fn finish_extraction(&mut self, result: Result<ExtractProfileEnvelope, ClientError>) -> Notice {
        self.extracting = false;

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(ClientError::Rejected(message)) => {
                return Notice::destructive("Extraction failed", message);
            }
            Err(ClientError::Status(status)) => {
                app_log!(warn, "Extraction service returned {}", status);
                return Notice::destructive("Extraction failed", EXTRACTION_FALLBACK);
            }
            Err(e) => {
                app_log!(error, "Extraction request failed: {}", e);
                return Notice::destructive("Error", "Something went wrong. Please try again.");
            }
        };

        let profile = envelope
            .success
            .then_some(envelope.data.as_ref())
            .flatten()
            .and_then(ConsultantProfile::from_value);

        match profile {
            Some(profile) => {
                self.profile = profile;
                self.extracted = true;
                Notice::info("Profile extracted!", "We've auto-filled your details from LinkedIn.")
            }
            None => Notice::destructive(
                "Extraction failed",
                envelope.error.unwrap_or_else(|| EXTRACTION_FALLBACK.to_string()),
            ),
        }
    }

    /// `None` only when an extraction is already running.
    pub async fn extract<C>(&mut self, client: &C) -> Option<Notice>
    where
        C: ExtractionClient + ?Sized,
    {
        match self.begin_extraction() {
            Start::Busy => None,
            Start::Rejected(notice) => Some(notice),
            Start::Send(text) => {
                let result = client.extract(&text).await;
                Some(self.finish_extraction(result))
            }
        }
    }

    pub fn begin_submission(&mut self) -> Start<ConsultantProfile> {
        if self.submitting {
            return Start::Busy;
        }
        if !self.profile.missing_required().is_empty() {
            return Start::Rejected(missing_information());
        }
        self.submitting = true;
        Start::Send(self.profile.clone())
    }

    /// Success clears the model, the pasted text and the extracted flag.
    pub fn finish_submission(&mut self, result: Result<(), SubmissionError>) -> Notice {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.profile = ConsultantProfile::default();
                self.profile_text.clear();
                self.extracted = false;
                Notice::info(
                    "Application Submitted!",
                    "Your consultant application has been received. We'll review it within 48 hours.",
                )
            }
            Err(e) => {
                app_log!(warn, "Application submission failed: {}", e);
                Notice::destructive(
                    "Submission Failed",
                    "There was an error submitting your application. Please try again.",
                )
            }
        }
    }

    pub async fn submit<S>(&mut self, submitter: &S) -> Option<Notice>
    where
        S: ApplicationSubmitter + ?Sized,
    {
        match self.begin_submission() {
            Start::Busy => None,
            Start::Rejected(notice) => Some(notice),
            Start::Send(profile) => {
                let result = submitter.submit(&profile).await;
                Some(self.finish_submission(result))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> ExtractProfileEnvelope {
        serde_json::from_value(value).unwrap()
    }

    fn filled() -> ConsultantProfile {
        ConsultantProfile {
            name: Some("Jane Doe".to_string()),
            title: Some("Regulatory Lead".to_string()),
            location: Some("Basel".to_string()),
            ..Default::default()
        }
    }

    const TEXT: &str = "Jane Doe - Regulatory Lead - Basel, Switzerland";

    #[test]
    fn test_short_text_rejected_without_state_change() {
        let mut flow = ProfileExtractionFlow::new();
        *flow.profile_mut() = filled();
        flow.set_text("  short  ");

        match flow.begin_extraction() {
            Start::Rejected(notice) => assert_eq!(notice.title, "Too short"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(!flow.is_extracting());
        assert_eq!(flow.profile(), &filled());
    }

    #[test]
    fn test_single_extraction_in_flight() {
        let mut flow = ProfileExtractionFlow::new();
        flow.set_text(TEXT);
        assert!(matches!(flow.begin_extraction(), Start::Send(_)));
        assert_eq!(flow.begin_extraction(), Start::Busy);
    }

    #[test]
    fn test_rejected_envelope_keeps_model() {
        let mut flow = ProfileExtractionFlow::new();
        *flow.profile_mut() = filled();
        flow.set_text(TEXT);
        flow.begin_extraction();

        let notice = flow.finish_extraction(Ok(envelope(json!({"success": false, "error": "x"}))));
        assert_eq!(notice.description, "x");
        assert!(notice.is_error());
        assert_eq!(flow.profile(), &filled());
        assert!(!flow.is_extracted());
        assert!(!flow.is_extracting());
    }

    #[test]
    fn test_failures_use_fallbacks() {
        let mut flow = ProfileExtractionFlow::new();
        flow.set_text(TEXT);

        flow.begin_extraction();
        let notice = flow.finish_extraction(Ok(envelope(json!({"success": false}))));
        assert_eq!(notice.description, EXTRACTION_FALLBACK);

        flow.begin_extraction();
        let notice = flow.finish_extraction(Err(ClientError::Status(502)));
        assert_eq!(notice.title, "Extraction failed");

        flow.begin_extraction();
        let notice = flow.finish_extraction(Err(ClientError::Malformed("eof".to_string())));
        assert_eq!(notice.title, "Error");
        assert!(flow.profile().is_empty());
    }

    #[test]
    fn test_success_replaces_model() {
        let mut flow = ProfileExtractionFlow::new();
        *flow.profile_mut() = filled();
        flow.set_text(TEXT);
        flow.begin_extraction();

        let notice = flow.finish_extraction(Ok(envelope(json!({
            "success": true,
            "data": {"name": "Jane Doe", "title": null, "yearsExperience": 9}
        }))));
        assert_eq!(notice.title, "Profile extracted!");
        assert!(flow.is_extracted());
        assert_eq!(flow.profile().title, None);
        assert_eq!(flow.profile().location, None);
        assert_eq!(flow.profile().years_experience, Some(9));
    }

    #[tokio::test]
    async fn test_submit_requires_core_fields() {
        let mut flow = ProfileExtractionFlow::new();
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1));
        let notice = flow.submit(&submitter).await.unwrap();
        assert_eq!(notice.title, "Missing Information");
    }

    struct FailingSubmitter;

    #[async_trait]
    impl ApplicationSubmitter for FailingSubmitter {
        async fn submit(&self, profile: &ConsultantProfile) -> Result<(), SubmissionError> {
            Err(SubmissionError::Rejected(format!(
                "duplicate application for {}",
                profile.name.as_deref().unwrap_or_default()
            )))
        }
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_form() {
        let mut flow = ProfileExtractionFlow::new();
        *flow.profile_mut() = filled();

        let notice = flow.submit(&FailingSubmitter).await.unwrap();
        assert_eq!(notice.title, "Submission Failed");
        assert!(notice.is_error());
        assert_eq!(flow.profile(), &filled());
        assert!(!flow.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_resets_form() {
        let mut flow = ProfileExtractionFlow::new();
        flow.set_text(TEXT);
        flow.begin_extraction();
        flow.finish_extraction(Ok(envelope(json!({
            "success": true,
            "data": {"name": "Jane Doe", "title": "Regulatory Lead", "location": "Basel"}
        }))));

        let submitter = SimulatedSubmitter::new(Duration::from_millis(1));
        let notice = flow.submit(&submitter).await.unwrap();
        assert_eq!(notice.title, "Application Submitted!");
        assert!(flow.profile().is_empty());
        assert!(flow.text().is_empty());
        assert!(!flow.is_extracted());
    }
}
