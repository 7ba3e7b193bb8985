// src/types/profile.rs
//! Consultant application profile, filled manually or from extracted text.
//!
//! Every field is optional: extracted values are inferred by a language model
//! and carry no provenance, so nothing downstream may treat them as verified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::is_blank;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsultantProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub expertise: Option<Vec<String>>,
    pub services: Option<Vec<String>>,
    pub years_experience: Option<u32>,
    pub industries: Option<Vec<String>>,
}

impl ConsultantProfile {
    /// Read a profile out of an arbitrary JSON value.
    ///
    /// Fields of the wrong type are dropped to `None` instead of failing the
    /// whole record. Returns `None` only when `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        Some(Self {
            name: text_field(object.get("name")),
            title: text_field(object.get("title")),
            location: text_field(object.get("location")),
            bio: text_field(object.get("bio")),
            expertise: list_field(object.get("expertise")),
            services: list_field(object.get("services")),
            years_experience: years_field(object.get("yearsExperience")),
            industries: list_field(object.get("industries")),
        })
    }

    /// Labels of the fields an application cannot be submitted without.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.name.as_deref()) {
            missing.push("name");
        }
        if is_blank(self.title.as_deref()) {
            missing.push("title");
        }
        if is_blank(self.location.as_deref()) {
            missing.push("location");
        }
        missing
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn list_field(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

fn years_field(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|years| u32::try_from(years).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
