// src/web/handlers/dashboard_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

use crate::dashboard::{self, DashboardError, DashboardStats, ProjectQuery, StatusFilter};
use crate::types::{Project, ProjectStatus};
use crate::web::services::Services;
use crate::web::types::*;

fn dashboard_error(e: DashboardError) -> ApiError {
    match e {
        DashboardError::UnknownStatus(status) => {
            let hint = format!(
                "Use all or one of: {}",
                ProjectStatus::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            api_error(
                Status::BadRequest,
                format!("Unknown status filter: {}", status),
                "INVALID_STATUS",
                &[hint.as_str()],
            )
        }
        other => {
            error!("Project data error: {}", other);
            api_error(
                Status::InternalServerError,
                "Project data unavailable",
                "DASHBOARD_ERROR",
                &["Try again in a few moments"],
            )
        }
    }
}

pub async fn list_projects_handler(
    params: ProjectSearchParams,
    services: &State<Services>,
) -> ApiResult<DataResponse<Vec<Project>>> {
    let status = StatusFilter::parse(params.status.as_deref()).map_err(dashboard_error)?;
    let query = ProjectQuery {
        search: params.search.unwrap_or_default(),
        status,
    };

    let projects = services.projects.list().await.map_err(dashboard_error)?;
    let filtered: Vec<Project> = dashboard::filter_projects(&projects, &query)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse::success(
        format!("{} projects", filtered.len()),
        filtered,
    )))
}

pub async fn dashboard_stats_handler(
    services: &State<Services>,
) -> ApiResult<DataResponse<DashboardStats>> {
    let projects = services.projects.list().await.map_err(dashboard_error)?;
    Ok(Json(DataResponse::success(
        "Dashboard summary".to_string(),
        dashboard::stats(&projects),
    )))
}
