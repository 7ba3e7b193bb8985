// src/web/handlers/consultant_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::directory::{self, DirectoryError, FilterOptions};
use crate::types::Consultant;
use crate::web::services::Services;
use crate::web::types::*;

fn directory_unavailable(e: DirectoryError) -> ApiError {
    error!("Consultant directory error: {}", e);
    api_error(
        Status::InternalServerError,
        "Consultant directory unavailable",
        "DIRECTORY_ERROR",
        &["Try again in a few moments"],
    )
}

fn consultant_not_found(id: u32) -> ApiError {
    api_error(
        Status::NotFound,
        format!("Consultant {} not found", id),
        "CONSULTANT_NOT_FOUND",
        &["Browse the directory for available consultants"],
    )
}

pub async fn search_consultants_handler(
    params: ConsultantSearchParams,
    services: &State<Services>,
) -> ApiResult<DataResponse<Vec<Consultant>>> {
    let query = params.into_query().map_err(|e| {
        api_error(
            Status::BadRequest,
            e.to_string(),
            "INVALID_SORT",
            &["Use one of: rating, reviews, price-low, price-high"],
        )
    })?;

    let consultants = services
        .consultants
        .list()
        .await
        .map_err(directory_unavailable)?;

    let results: Vec<Consultant> = directory::search(&consultants, &query)
        .into_iter()
        .cloned()
        .collect();

    info!(
        "Consultant search matched {} of {} (sort: {})",
        results.len(),
        consultants.len(),
        query.sort.as_str()
    );

    Ok(Json(DataResponse::success(
        format!("{} consultants found", results.len()),
        results,
    )))
}

pub async fn featured_consultants_handler(
    services: &State<Services>,
) -> ApiResult<DataResponse<Vec<Consultant>>> {
    let consultants = services
        .consultants
        .list()
        .await
        .map_err(directory_unavailable)?;

    Ok(Json(DataResponse::success(
        "Featured consultants".to_string(),
        directory::featured(&consultants).to_vec(),
    )))
}

pub async fn filter_options_handler() -> Json<DataResponse<FilterOptions>> {
    Json(DataResponse::success(
        "Filter options".to_string(),
        directory::filter_options(),
    ))
}

pub async fn get_consultant_handler(
    id: u32,
    services: &State<Services>,
) -> ApiResult<DataResponse<Consultant>> {
    let consultant = services
        .consultants
        .find(id)
        .await
        .map_err(directory_unavailable)?
        .ok_or_else(|| consultant_not_found(id))?;

    Ok(Json(DataResponse::success(
        format!("Consultant {}", consultant.name),
        consultant,
    )))
}

pub async fn related_consultants_handler(
    id: u32,
    services: &State<Services>,
) -> ApiResult<DataResponse<Vec<Consultant>>> {
    let consultants = services
        .consultants
        .list()
        .await
        .map_err(directory_unavailable)?;

    if !consultants.iter().any(|c| c.id == id) {
        return Err(consultant_not_found(id));
    }

    let related: Vec<Consultant> = directory::related(&consultants, id)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse::success(
        format!("{} related consultants", related.len()),
        related,
    )))
}

pub(crate) async fn lookup_consultant(services: &Services, id: u32) -> Result<Consultant, ApiError> {
    services
        .consultants
        .find(id)
        .await
        .map_err(directory_unavailable)?
        .ok_or_else(|| consultant_not_found(id))
}
