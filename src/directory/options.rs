// src/directory/options.rs
use serde::Serialize;

use super::search::SortKey;

/// Sentinel the storefront sends for an inactive filter.
pub const ALL: &str = "All";

pub const EXPERTISE_FILTERS: &[&str] = &[
    ALL,
    "Regulatory Affairs",
    "Quality Assurance",
    "Clinical Development",
    "Drug Safety",
    "CMC / Formulation",
    "Medical Affairs",
    "Manufacturing",
    "Biotech R&D",
    "Program Management",
    "Project Manager",
    "Translational Medicine",
    "Clinical Operations",
    "Quality Control",
    "Commercial / NPP",
    "Biostatistics",
    "Statistical Programming",
    "Data Management",
    "Medical Monitoring",
];

pub const COUNTRIES: &[&str] = &[
    ALL,
    "Australia",
    "Brazil",
    "Canada",
    "China",
    "Colombia",
    "Denmark",
    "European Union",
    "France",
    "Germany",
    "India",
    "Japan",
    "Mexico",
    "New Zealand",
    "Norway",
    "Russia",
    "Saudi Arabia",
    "South Korea",
    "Sweden",
    "Switzerland",
    "Taiwan",
    "UAE",
    "United Kingdom",
    "United States",
];

pub const LANGUAGES: &[&str] = &[
    ALL,
    "Arabic",
    "Chinese (Mandarin)",
    "Chinese (Cantonese)",
    "Colombian Spanish",
    "Danish",
    "Dutch",
    "English",
    "French",
    "German",
    "Hindi",
    "Italian",
    "Japanese",
    "Korean",
    "Malay",
    "Norwegian",
    "Portuguese",
    "Russian",
    "Spanish",
    "Swedish",
    "Tamil",
    "Thai",
    "Turkish",
    "Ukrainian",
    "Urdu",
];

#[derive(Debug, Serialize)]
pub struct SortOption {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub expertise: Vec<&'static str>,
    pub countries: Vec<&'static str>,
    pub languages: Vec<&'static str>,
    pub sort: Vec<SortOption>,
}

pub fn filter_options() -> FilterOptions {
    FilterOptions {
        expertise: EXPERTISE_FILTERS.to_vec(),
        countries: COUNTRIES.to_vec(),
        languages: LANGUAGES.to_vec(),
        sort: SortKey::ALL
            .into_iter()
            .map(|key| SortOption {
                key: key.as_str(),
                label: key.label(),
            })
            .collect(),
    }
}
