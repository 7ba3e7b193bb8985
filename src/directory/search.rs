// src/directory/search.rs
//! Filter and sort over the consultant directory.
//!
//! Active predicates combine with AND. Sorting uses the stable `sort_by`, so
//! consultants that tie on the sort key keep their directory order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

use super::options::ALL;
use crate::types::Consultant;
use crate::utils::contains_lowercase;

pub const FEATURED_COUNT: usize = 6;
pub const RELATED_COUNT: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Rating,
    Reviews,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Rating,
        SortKey::Reviews,
        SortKey::PriceLow,
        SortKey::PriceHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::Reviews => "reviews",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Rating => "Highest Rated",
            SortKey::Reviews => "Most Reviews",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
        }
    }

    fn compare(&self, a: &Consultant, b: &Consultant) -> Ordering {
        match self {
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Reviews => b.reviews.cmp(&a.reviews),
            SortKey::PriceLow => a.hourly_rate.cmp(&b.hourly_rate),
            SortKey::PriceHigh => b.hourly_rate.cmp(&a.hourly_rate),
        }
    }
}

impl FromStr for SortKey {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SearchError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub expertise: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub sort: SortKey,
}

impl SearchQuery {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_expertise(mut self, expertise: impl Into<String>) -> Self {
        self.expertise = Some(expertise.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Empty values and the `All` sentinel leave a selector filter inactive.
fn selector(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

fn matches_text(consultant: &Consultant, text_lower: &str) -> bool {
    contains_lowercase(&consultant.name, text_lower)
        || contains_lowercase(&consultant.title, text_lower)
        || consultant
            .expertise
            .iter()
            .any(|tag| contains_lowercase(tag, text_lower))
        || contains_lowercase(&consultant.bio, text_lower)
}

fn matches_expertise(consultant: &Consultant, tag_lower: &str) -> bool {
    consultant
        .expertise
        .iter()
        .any(|tag| contains_lowercase(tag, tag_lower))
        || contains_lowercase(&consultant.title, tag_lower)
}

pub fn search<'a>(consultants: &'a [Consultant], query: &SearchQuery) -> Vec<&'a Consultant> {
    let text = query
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);
    let expertise = selector(&query.expertise).map(str::to_lowercase);
    let country = selector(&query.country);
    let language = selector(&query.language);

    let mut result: Vec<&Consultant> = consultants
        .iter()
        .filter(|c| text.as_deref().map_or(true, |t| matches_text(c, t)))
        .filter(|c| expertise.as_deref().map_or(true, |e| matches_expertise(c, e)))
        .filter(|c| country.map_or(true, |country| c.country == country))
        .filter(|c| language.map_or(true, |language| c.speaks(language)))
        .collect();

    result.sort_by(|a, b| query.sort.compare(a, b));
    result
}

/// Consultants shown on the landing page: the head of the directory.
pub fn featured(consultants: &[Consultant]) -> &[Consultant] {
    &consultants[..consultants.len().min(FEATURED_COUNT)]
}

/// Other consultants suggested next to a profile, in directory order.
pub fn related(consultants: &[Consultant], id: u32) -> Vec<&Consultant> {
    consultants
        .iter()
        .filter(|c| c.id != id)
        .take(RELATED_COUNT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;

    fn seed() -> Vec<Consultant> {
        StaticDirectory::builtin().unwrap().consultants().to_vec()
    }

    fn ids(result: &[&Consultant]) -> Vec<u32> {
        result.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_country_filter_switzerland() {
        let consultants = seed();
        let result = search(&consultants, &SearchQuery::default().with_country("Switzerland"));
        assert_eq!(ids(&result), vec![3]);
        assert_eq!(result[0].name, "Maria Gonzalez");
    }

    #[test]
    fn test_empty_query_returns_everything_by_rating() {
        let consultants = seed();
        let result = search(&consultants, &SearchQuery::default());
        assert_eq!(result.len(), consultants.len());
        // ties (4.9: ids 1 and 5, 4.8: ids 2 and 6) keep directory order
        assert_eq!(ids(&result), vec![3, 1, 5, 2, 6, 4]);
    }

    #[test]
    fn test_rating_sort_is_descending() {
        let consultants = seed();
        let result = search(&consultants, &SearchQuery::default().with_language("English"));
        for pair in result.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
        }
    }

    #[test]
    fn test_text_matches_any_field_case_insensitively() {
        let consultants = seed();

        let by_name = search(&consultants, &SearchQuery::default().with_text("okonkwo"));
        assert_eq!(ids(&by_name), vec![2]);

        let by_tag = search(&consultants, &SearchQuery::default().with_text("gmp"));
        assert_eq!(ids(&by_tag), vec![3]);

        let by_bio = search(&consultants, &SearchQuery::default().with_text("ONCOLOGY"));
        assert_eq!(ids(&by_bio), vec![2, 6]);

        let none = search(&consultants, &SearchQuery::default().with_text("veterinary"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_expertise_matches_tag_or_title() {
        let consultants = seed();

        let by_title = search(
            &consultants,
            &SearchQuery::default().with_expertise("Regulatory Affairs"),
        );
        assert_eq!(ids(&by_title), vec![1]);

        let by_tag = search(&consultants, &SearchQuery::default().with_expertise("biologics"));
        assert_eq!(ids(&by_tag), vec![5]);

        let clinical_ops = search(
            &consultants,
            &SearchQuery::default().with_expertise("Clinical Operations"),
        );
        assert_eq!(ids(&clinical_ops), vec![2]);
    }

    #[test]
    fn test_all_sentinel_and_empty_are_inactive() {
        let consultants = seed();
        let query = SearchQuery::default()
            .with_text("")
            .with_expertise("All")
            .with_country("all")
            .with_language("");
        assert_eq!(search(&consultants, &query).len(), consultants.len());
    }

    #[test]
    fn test_language_is_exact_membership() {
        let consultants = seed();
        let spanish = search(&consultants, &SearchQuery::default().with_language("Spanish"));
        assert_eq!(ids(&spanish), vec![3, 6]);

        let lowercase = search(&consultants, &SearchQuery::default().with_language("spanish"));
        assert!(lowercase.is_empty());
    }

    #[test]
    fn test_filters_combine_with_and() {
        let consultants = seed();
        let query = SearchQuery::default()
            .with_country("United States")
            .with_language("Spanish");
        let result = search(&consultants, &query);
        assert_eq!(ids(&result), vec![6]);

        for c in &result {
            assert_eq!(c.country, "United States");
            assert!(c.speaks("Spanish"));
        }
    }

    #[test]
    fn test_result_is_subset_satisfying_every_predicate() {
        let consultants = seed();
        let texts = ["", "dr", "quality", "trial"];
        let countries = ["All", "United States", "Sweden"];
        let languages = ["All", "English", "Hindi"];

        for text in texts {
            for country in countries {
                for language in languages {
                    let query = SearchQuery::default()
                        .with_text(text)
                        .with_country(country)
                        .with_language(language);
                    for c in search(&consultants, &query) {
                        assert!(consultants.contains(c));
                        assert!(text.is_empty() || matches_text(c, text));
                        assert!(country == "All" || c.country == country);
                        assert!(language == "All" || c.speaks(language));
                    }
                }
            }
        }
    }

    #[test]
    fn test_price_and_review_sorts() {
        let consultants = seed();

        let low = search(&consultants, &SearchQuery::default().sorted_by(SortKey::PriceLow));
        assert_eq!(ids(&low), vec![4, 6, 2, 5, 1, 3]);

        let high = search(&consultants, &SearchQuery::default().sorted_by(SortKey::PriceHigh));
        assert_eq!(ids(&high), vec![3, 1, 5, 2, 6, 4]);

        let reviews = search(&consultants, &SearchQuery::default().sorted_by(SortKey::Reviews));
        assert_eq!(ids(&reviews), vec![3, 1, 5, 2, 6, 4]);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-low".parse::<SortKey>(), Ok(SortKey::PriceLow));
        assert_eq!("rating".parse::<SortKey>(), Ok(SortKey::Rating));
        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(SearchError::UnknownSortKey("cheapest".to_string()))
        );
    }

    #[test]
    fn test_featured_and_related() {
        let consultants = seed();
        assert_eq!(featured(&consultants).len(), FEATURED_COUNT);
        assert_eq!(featured(&consultants[..2]).len(), 2);

        assert_eq!(ids(&related(&consultants, 1)), vec![2, 3, 4]);
        assert_eq!(ids(&related(&consultants, 3)), vec![1, 2, 4]);
        assert_eq!(ids(&related(&consultants, 42)), vec![1, 2, 3]);
    }
}
