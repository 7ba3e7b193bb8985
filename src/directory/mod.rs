// src/directory/mod.rs
//! Read-only consultant directory.
//!
//! Handlers only see the [`ConsultantRepository`] capability, so the bundled
//! seed list can be swapped for a real profile service without touching the
//! search engine.

pub mod options;
pub mod search;

pub use options::{filter_options, FilterOptions};
pub use search::{featured, related, search, SearchError, SearchQuery, SortKey};

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app_log;
use crate::types::Consultant;

const BUILTIN_CONSULTANTS: &str = include_str!("../../data/consultants.toml");

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read directory file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse directory data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate consultant id {0}")]
    DuplicateId(u32),

    #[error("Invalid consultant {id}: {reason}")]
    InvalidRecord { id: u32, reason: String },
}

#[async_trait]
pub trait ConsultantRepository: Send + Sync {
    /// All consultants in directory order.
    async fn list(&self) -> Result<Vec<Consultant>, DirectoryError>;

    async fn find(&self, id: u32) -> Result<Option<Consultant>, DirectoryError> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }
}

#[derive(Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    consultants: Vec<Consultant>,
}

/// In-memory directory loaded once from TOML.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    consultants: Vec<Consultant>,
}

impl StaticDirectory {
    /// The seed list shipped with the binary.
    pub fn builtin() -> Result<Self, DirectoryError> {
        Self::from_toml_str(BUILTIN_CONSULTANTS)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DirectoryError> {
        let file: DirectoryFile = toml::from_str(content)?;
        Self::new(file.consultants)
    }

    pub async fn from_toml_file(path: &Path) -> Result<Self, DirectoryError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DirectoryError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let directory = Self::from_toml_str(&content)?;
        app_log!(
            info,
            "Loaded {} consultants from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    pub fn new(consultants: Vec<Consultant>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::new();
        for consultant in &consultants {
            if !seen.insert(consultant.id) {
                return Err(DirectoryError::DuplicateId(consultant.id));
            }
            if !(0.0..=5.0).contains(&consultant.rating) {
                return Err(DirectoryError::InvalidRecord {
                    id: consultant.id,
                    reason: format!("rating {} outside 0-5", consultant.rating),
                });
            }
        }
        Ok(Self { consultants })
    }

    pub fn consultants(&self) -> &[Consultant] {
        &self.consultants
    }

    pub fn len(&self) -> usize {
        self.consultants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consultants.is_empty()
    }
}

#[async_trait]
impl ConsultantRepository for StaticDirectory {
    async fn list(&self) -> Result<Vec<Consultant>, DirectoryError> {
        Ok(self.consultants.clone())
    }

    async fn find(&self, id: u32) -> Result<Option<Consultant>, DirectoryError> {
        Ok(self.consultants.iter().find(|c| c.id == id).cloned())
    }
}
