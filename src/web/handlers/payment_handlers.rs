// src/web/handlers/payment_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;
use uuid::Uuid;

use super::consultant_handlers::lookup_consultant;
use crate::payment::{
    CheckoutError, CheckoutView, CostBreakdown, Engagement, DEFAULT_ESTIMATED_HOURS,
    DEFAULT_PROJECT_TITLE, MAX_ESTIMATED_HOURS,
};
use crate::utils::is_blank;
use crate::web::services::Services;
use crate::web::types::*;

fn checkout_error(e: CheckoutError) -> ApiError {
    match e {
        CheckoutError::NotFound(id) => api_error(
            Status::NotFound,
            format!("Checkout session {} not found", id),
            "CHECKOUT_NOT_FOUND",
            &["Start a new checkout"],
        ),
        CheckoutError::PaymentInProgress => api_error(
            Status::Conflict,
            "Payment is being processed",
            "PAYMENT_IN_PROGRESS",
            &["Wait for the payment to complete"],
        ),
        CheckoutError::Closed(id) => api_error(
            Status::Conflict,
            format!("Checkout session {} is closed", id),
            "CHECKOUT_CLOSED",
            &["Start a new checkout"],
        ),
        CheckoutError::Invalid(notice) => validation_error(notice),
    }
}

fn parse_session_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| {
        api_error(
            Status::NotFound,
            format!("Checkout session {} not found", id),
            "CHECKOUT_NOT_FOUND",
            &["Start a new checkout"],
        )
    })
}

async fn engagement_for(services: &Services, request: EngagementRequest) -> Result<Engagement, ApiError> {
    let consultant = lookup_consultant(services, request.consultant_id).await?;

    let hours = request.estimated_hours.unwrap_or(DEFAULT_ESTIMATED_HOURS);
    if hours == 0 || hours > MAX_ESTIMATED_HOURS {
        let hint = format!("Provide estimatedHours between 1 and {}", MAX_ESTIMATED_HOURS);
        return Err(api_error(
            Status::BadRequest,
            format!("Estimated hours must be between 1 and {}", MAX_ESTIMATED_HOURS),
            "INVALID_HOURS",
            &[hint.as_str()],
        ));
    }

    let title = match request.project_title {
        Some(title) if !is_blank(Some(&title)) => title,
        _ => DEFAULT_PROJECT_TITLE.to_string(),
    };

    Engagement::new(&consultant, title, hours).map_err(|e| {
        api_error(
            Status::BadRequest,
            e.to_string(),
            "QUOTE_TOO_LARGE",
            &["Reduce estimatedHours"],
        )
    })
}

pub async fn quote_handler(
    request: Json<EngagementRequest>,
    services: &State<Services>,
) -> ApiResult<DataResponse<CostBreakdown>> {
    let engagement = engagement_for(services, request.into_inner()).await?;
    let breakdown = engagement.breakdown();

    info!(
        "Quote for consultant {}: {} + {} fee",
        breakdown.consultant_id, breakdown.total_amount, breakdown.platform_fee
    );

    Ok(Json(DataResponse::success(
        format!("Quote for {}", breakdown.consultant_name),
        breakdown,
    )))
}

pub async fn start_checkout_handler(
    request: Json<EngagementRequest>,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    let engagement = engagement_for(services, request.into_inner()).await?;
    let view = services.checkout.start(engagement).await;
    Ok(Json(DataResponse::success("Checkout started".to_string(), view)))
}

pub async fn get_checkout_handler(
    id: &str,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    let session_id = parse_session_id(id)?;
    let view = services.checkout.view(session_id).await.map_err(checkout_error)?;
    Ok(Json(DataResponse::success("Checkout".to_string(), view)))
}

pub async fn update_checkout_handler(
    id: &str,
    patch: Json<CheckoutPatch>,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    let session_id = parse_session_id(id)?;
    let view = services
        .checkout
        .update(session_id, &patch.into_inner().changes())
        .await
        .map_err(checkout_error)?;
    Ok(Json(DataResponse::success("Checkout updated".to_string(), view)))
}

/// Waits for the authorization when the flow leaves `payment`. A declined
/// charge still answers 200; the view carries the failure notice.
pub async fn submit_checkout_handler(
    id: &str,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    let session_id = parse_session_id(id)?;
    let view = services.checkout.submit(session_id).await.map_err(checkout_error)?;
    let message = view
        .notice
        .as_ref()
        .map(|notice| notice.title.clone())
        .unwrap_or_else(|| format!("Checkout at {:?}", view.step).to_lowercase());
    Ok(Json(DataResponse::success(message, view)))
}

pub async fn back_checkout_handler(
    id: &str,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    let session_id = parse_session_id(id)?;
    let view = services.checkout.back(session_id).await.map_err(checkout_error)?;
    Ok(Json(DataResponse::success("Checkout".to_string(), view)))
}

pub async fn close_checkout_handler(
    id: &str,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    let session_id = parse_session_id(id)?;
    let view = services.checkout.close(session_id).await.map_err(checkout_error)?;
    Ok(Json(DataResponse::success("Checkout closed".to_string(), view)))
}
