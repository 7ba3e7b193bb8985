// src/extraction/mod.rs
//! Profile extraction: the completion-backed extractor served over HTTP and
//! the application form that consumes it.

pub mod extractor;
pub mod flow;
pub mod gateway;
pub mod prompt;

pub use extractor::{ExtractionError, ProfileExtractor, MIN_PROFILE_TEXT_CHARS};
pub use flow::{
    ApplicationSubmitter, ClientError, ExtractionClient, HttpExtractionClient, ProfileExtractionFlow,
    SimulatedSubmitter, Start, SubmissionError,
};
pub use gateway::{ChatCompletionClient, CompletionClient, GatewayError};
