// src/types/consultant.rs
use serde::{Deserialize, Serialize};

// ===== Directory Records =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultant {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub location: String,
    pub country: String,
    pub languages: Vec<String>,
    /// 0.0 to 5.0
    pub rating: f64,
    pub reviews: u32,
    /// Whole currency units per hour.
    pub hourly_rate: u32,
    pub expertise: Vec<String>,
    pub bio: String,
    pub verified: bool,
    /// Initials shown when no picture is available.
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_online: bool,
}

impl Consultant {
    pub fn speaks(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}
