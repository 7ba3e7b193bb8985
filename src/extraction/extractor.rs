// src/extraction/extractor.rs
//! Turns pasted profile text into a nullable [`ConsultantProfile`] through a
//! chat-completion model.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::gateway::{CompletionClient, GatewayError};
use super::prompt::{user_message, DEFAULT_MAX_INPUT_CHARS, SYSTEM_PROMPT};
use crate::app_log;
use crate::types::ConsultantProfile;
use crate::utils::char_len;

/// Shortest trimmed input worth sending to the model.
pub const MIN_PROFILE_TEXT_CHARS: usize = 30;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Please paste more profile content (at least a few lines).")]
    TooShort,

    #[error("AI gateway not configured")]
    NotConfigured,

    #[error("Failed to process profile data")]
    Upstream(#[source] GatewayError),

    #[error("Failed to parse extracted data")]
    Parse,
}

impl ExtractionError {
    pub fn status_code(&self) -> u16 {
        match self {
            ExtractionError::TooShort => 400,
            _ => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ExtractionError::TooShort => "PROFILE_TEXT_TOO_SHORT",
            ExtractionError::NotConfigured => "GATEWAY_NOT_CONFIGURED",
            ExtractionError::Upstream(_) => "GATEWAY_ERROR",
            ExtractionError::Parse => "EXTRACTION_PARSE_ERROR",
        }
    }
}

#[derive(Clone)]
pub struct ProfileExtractor {
    completions: Option<Arc<dyn CompletionClient>>,
    max_input_chars: usize,
}

impl ProfileExtractor {
    /// `None` means no gateway credential was configured; every extraction
    /// then fails with [`ExtractionError::NotConfigured`].
    pub fn new(completions: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            completions,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.completions.is_some()
    }

    pub async fn extract(&self, profile_text: Option<&str>) -> Result<ConsultantProfile, ExtractionError> {
        let text = match profile_text {
            Some(text) if char_len(text.trim()) >= MIN_PROFILE_TEXT_CHARS => text,
            _ => return Err(ExtractionError::TooShort),
        };

        let completions = self
            .completions
            .as_ref()
            .ok_or(ExtractionError::NotConfigured)?;

        app_log!(info, "Extracting profile data, input length: {}", char_len(text));

        let content = completions
            .complete(SYSTEM_PROMPT, &user_message(text, self.max_input_chars))
            .await
            .map_err(|e| {
                app_log!(error, "Profile extraction failed: {}", e);
                ExtractionError::Upstream(e)
            })?;

        let profile = parse_profile(&content).ok_or_else(|| {
            app_log!(error, "Failed to parse model output ({} chars)", char_len(&content));
            ExtractionError::Parse
        })?;

        app_log!(info, "Profile extracted successfully");
        Ok(profile)
    }
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker, each with at most
/// one trailing newline, then trim.
pub fn strip_code_fences(content: &str) -> String {
    content
        .replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

pub fn parse_profile(content: &str) -> Option<ConsultantProfile> {
    let value: Value = serde_json::from_str(&strip_code_fences(content)).ok()?;
    ConsultantProfile::from_value(&value)
}
