// src/dashboard.rs
//! Client dashboard: engagement projects, search and summary figures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Project, ProjectStatus};
use crate::utils::contains_lowercase;

const BUILTIN_PROJECTS: &str = include_str!("../data/projects.toml");

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to parse project data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid project {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Unknown status filter: {0}")]
    UnknownStatus(String),
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, DashboardError>;
}

#[derive(Deserialize)]
struct ProjectFile {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Debug, Clone)]
pub struct StaticProjects {
    projects: Vec<Project>,
}

impl StaticProjects {
    pub fn builtin() -> Result<Self, DashboardError> {
        Self::from_toml_str(BUILTIN_PROJECTS)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DashboardError> {
        let file: ProjectFile = toml::from_str(content)?;
        for project in &file.projects {
            if project.progress > 100 {
                return Err(DashboardError::InvalidRecord {
                    id: project.id.clone(),
                    reason: format!("progress {} above 100", project.progress),
                });
            }
        }
        Ok(Self {
            projects: file.projects,
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
}

#[async_trait]
impl ProjectRepository for StaticProjects {
    async fn list(&self) -> Result<Vec<Project>, DashboardError> {
        Ok(self.projects.clone())
    }
}

/// `all` (or nothing) keeps every status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    pub fn parse(value: Option<&str>) -> Result<Self, DashboardError> {
        match value {
            None | Some("") | Some("all") => Ok(StatusFilter::All),
            Some(other) => other
                .parse()
                .map(StatusFilter::Only)
                .map_err(|_| DashboardError::UnknownStatus(other.to_string())),
        }
    }

    fn accepts(&self, status: ProjectStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub search: String,
    pub status: StatusFilter,
}

/// Search matches title, consultant name or description; an empty search
/// matches everything.
pub fn filter_projects<'a>(projects: &'a [Project], query: &ProjectQuery) -> Vec<&'a Project> {
    let needle = query.search.to_lowercase();
    projects
        .iter()
        .filter(|p| {
            contains_lowercase(&p.title, &needle)
                || contains_lowercase(&p.consultant.name, &needle)
                || contains_lowercase(&p.description, &needle)
        })
        .filter(|p| query.status.accepts(p.status))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active: usize,
    pub completed: usize,
    pub total_budget: u64,
    pub total_spent: u64,
}

pub fn stats(projects: &[Project]) -> DashboardStats {
    projects
        .iter()
        .fold(DashboardStats::default(), |mut acc, project| {
            match project.status {
                ProjectStatus::Active => acc.active += 1,
                ProjectStatus::Completed => acc.completed += 1,
                _ => {}
            }
            acc.total_budget += project.budget;
            acc.total_spent += project.spent;
            acc
        })
}
