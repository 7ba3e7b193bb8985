// src/web/types.rs
use rocket::form::FromForm;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::directory::{SearchQuery, SortKey};
use crate::notice::Notice;
use crate::payment::PaymentField;

// ===== Response Envelopes =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    /// Set when the failure is a validation message meant for the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Error envelope paired with its HTTP status.
pub type ApiError = (Status, Json<StandardErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn api_error(status: Status, error: impl Into<String>, code: &str, suggestions: &[&str]) -> ApiError {
    (
        status,
        Json(StandardErrorResponse::new(
            error.into(),
            code.to_string(),
            suggestions.iter().map(|s| s.to_string()).collect(),
        )),
    )
}

/// 400 carrying a user-facing validation notice.
pub fn validation_error(notice: Notice) -> ApiError {
    (
        Status::BadRequest,
        Json(
            StandardErrorResponse::new(
                notice.description.clone(),
                "VALIDATION_ERROR".to_string(),
                Vec::new(),
            )
            .with_notice(notice),
        ),
    )
}

// ===== Requests =====

#[derive(Debug, Default, FromForm)]
pub struct ConsultantSearchParams {
    pub text: Option<String>,
    pub expertise: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub sort: Option<String>,
}

impl ConsultantSearchParams {
    pub fn into_query(self) -> Result<SearchQuery, crate::directory::SearchError> {
        let sort = match self.sort.as_deref() {
            None | Some("") => SortKey::default(),
            Some(key) => key.parse()?,
        };
        Ok(SearchQuery {
            text: self.text,
            expertise: self.expertise,
            country: self.country,
            language: self.language,
            sort,
        })
    }
}

#[derive(Debug, Default, FromForm)]
pub struct ProjectSearchParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Body of both the quote and the checkout start endpoints.
#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct EngagementRequest {
    pub consultant_id: u32,
    #[serde(default)]
    pub project_title: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct CheckoutPatch {
    pub email: Option<String>,
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
    pub cardholder_name: Option<String>,
}

impl CheckoutPatch {
    pub fn changes(self) -> Vec<(PaymentField, String)> {
        [
            (PaymentField::Email, self.email),
            (PaymentField::CardNumber, self.card_number),
            (PaymentField::ExpiryDate, self.expiry_date),
            (PaymentField::Cvv, self.cvv),
            (PaymentField::CardholderName, self.cardholder_name),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_changes_skip_absent_fields() {
        let patch = CheckoutPatch {
            email: Some("a@b.c".to_string()),
            cvv: Some("123".to_string()),
            ..Default::default()
        };
        assert_eq!(
            patch.changes(),
            vec![
                (PaymentField::Email, "a@b.c".to_string()),
                (PaymentField::Cvv, "123".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_sort() {
        let params = ConsultantSearchParams {
            sort: Some("price-low".to_string()),
            ..Default::default()
        };
        assert_eq!(params.into_query().unwrap().sort, SortKey::PriceLow);

        let params = ConsultantSearchParams {
            sort: Some("cheapest".to_string()),
            ..Default::default()
        };
        assert!(params.into_query().is_err());
    }
}
