// src/web/handlers/extraction_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::extraction::flow::missing_information;
use crate::extraction::ExtractionError;
use crate::notice::Notice;
use crate::types::response::ExtractProfileRequest;
use crate::types::ConsultantProfile;
use crate::web::services::Services;
use crate::web::types::*;

fn extraction_error(e: ExtractionError) -> ApiError {
    let status = Status::from_code(e.status_code()).unwrap_or(Status::InternalServerError);
    let suggestions: &[&str] = match e {
        ExtractionError::TooShort => &["Paste the full profile page text"],
        ExtractionError::NotConfigured => &["Set AI_GATEWAY_API_KEY on the server"],
        ExtractionError::Upstream(_) | ExtractionError::Parse => {
            &["Try again in a few moments", "Enter your details manually"]
        }
    };
    api_error(status, e.to_string(), e.error_code(), suggestions)
}

pub async fn extract_profile_handler(
    request: Json<ExtractProfileRequest>,
    services: &State<Services>,
) -> ApiResult<DataResponse<ConsultantProfile>> {
    let request = request.into_inner();
    let profile = services
        .extractor
        .extract(request.profile_text.as_deref())
        .await
        .map_err(extraction_error)?;

    Ok(Json(DataResponse::success(
        "Profile extracted".to_string(),
        profile,
    )))
}

pub async fn submit_application_handler(
    profile: Json<ConsultantProfile>,
    services: &State<Services>,
) -> ApiResult<ActionResponse> {
    let profile = profile.into_inner();
    let missing = profile.missing_required();
    if !missing.is_empty() {
        info!("Application rejected, missing: {}", missing.join(", "));
        return Err(validation_error(missing_information()));
    }

    match services.applications.submit(&profile).await {
        Ok(()) => Ok(Json(
            ActionResponse::success("Application received".to_string(), "submitted".to_string())
                .with_notice(Notice::info(
                    "Application Submitted!",
                    "Your consultant application has been received. We'll review it within 48 hours.",
                )),
        )),
        Err(e) => {
            error!("Application submission failed: {}", e);
            Err(api_error(
                Status::InternalServerError,
                "There was an error submitting your application. Please try again.",
                "SUBMISSION_FAILED",
                &["Try again in a few moments"],
            ))
        }
    }
}
