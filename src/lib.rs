//! Backend for the Vixia life-sciences consultant marketplace.
//!
//! The crate serves the consultant directory and its search engine, the client
//! dashboard, engagement quotes and the checkout flow, and the profile
//! extraction collaborator that turns pasted profile text into structured
//! fields through a chat-completion API.

pub mod logging;

pub mod core;
pub mod dashboard;
pub mod directory;
pub mod extraction;
pub mod notice;
pub mod payment;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::core::ConfigManager;
pub use web::{build_rocket, start_web_server, Services};
