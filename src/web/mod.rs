// src/web/mod.rs

pub mod handlers;
pub mod services;
pub mod types;

pub use handlers::*;
pub use services::Services;
pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, patch, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::core::ConfigManager;
use crate::dashboard::DashboardStats;
use crate::directory::FilterOptions;
use crate::payment::{CheckoutView, CostBreakdown};
use crate::types::response::ExtractProfileRequest;
use crate::types::{Consultant, ConsultantProfile, Project};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ));
    }
}

// Directory

#[get("/consultants?<query..>")]
pub async fn search_consultants(
    query: ConsultantSearchParams,
    services: &State<Services>,
) -> ApiResult<DataResponse<Vec<Consultant>>> {
    handlers::search_consultants_handler(query, services).await
}

#[get("/consultants/featured")]
pub async fn featured_consultants(services: &State<Services>) -> ApiResult<DataResponse<Vec<Consultant>>> {
    handlers::featured_consultants_handler(services).await
}

#[get("/consultants/filters")]
pub async fn filter_options() -> Json<DataResponse<FilterOptions>> {
    handlers::filter_options_handler().await
}

#[get("/consultants/<id>")]
pub async fn get_consultant(id: u32, services: &State<Services>) -> ApiResult<DataResponse<Consultant>> {
    handlers::get_consultant_handler(id, services).await
}

#[get("/consultants/<id>/related")]
pub async fn related_consultants(
    id: u32,
    services: &State<Services>,
) -> ApiResult<DataResponse<Vec<Consultant>>> {
    handlers::related_consultants_handler(id, services).await
}

// Engagements and checkout

#[post("/engagements/quote", data = "<request>")]
pub async fn quote(
    request: Json<EngagementRequest>,
    services: &State<Services>,
) -> ApiResult<DataResponse<CostBreakdown>> {
    handlers::quote_handler(request, services).await
}

#[post("/checkout", data = "<request>")]
pub async fn start_checkout(
    request: Json<EngagementRequest>,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    handlers::start_checkout_handler(request, services).await
}

#[get("/checkout/<id>")]
pub async fn get_checkout(id: &str, services: &State<Services>) -> ApiResult<DataResponse<CheckoutView>> {
    handlers::get_checkout_handler(id, services).await
}

#[patch("/checkout/<id>", data = "<patch>")]
pub async fn update_checkout(
    id: &str,
    patch: Json<CheckoutPatch>,
    services: &State<Services>,
) -> ApiResult<DataResponse<CheckoutView>> {
    handlers::update_checkout_handler(id, patch, services).await
}

#[post("/checkout/<id>/submit")]
pub async fn submit_checkout(id: &str, services: &State<Services>) -> ApiResult<DataResponse<CheckoutView>> {
    handlers::submit_checkout_handler(id, services).await
}

#[post("/checkout/<id>/back")]
pub async fn back_checkout(id: &str, services: &State<Services>) -> ApiResult<DataResponse<CheckoutView>> {
    handlers::back_checkout_handler(id, services).await
}

#[post("/checkout/<id>/close")]
pub async fn close_checkout(id: &str, services: &State<Services>) -> ApiResult<DataResponse<CheckoutView>> {
    handlers::close_checkout_handler(id, services).await
}

// Dashboard

#[get("/dashboard/projects?<query..>")]
pub async fn list_projects(
    query: ProjectSearchParams,
    services: &State<Services>,
) -> ApiResult<DataResponse<Vec<Project>>> {
    handlers::list_projects_handler(query, services).await
}

#[get("/dashboard/stats")]
pub async fn dashboard_stats(services: &State<Services>) -> ApiResult<DataResponse<DashboardStats>> {
    handlers::dashboard_stats_handler(services).await
}

// Profile extraction and applications

#[post("/extract-profile", data = "<request>")]
pub async fn extract_profile(
    request: Json<ExtractProfileRequest>,
    services: &State<Services>,
) -> ApiResult<DataResponse<ConsultantProfile>> {
    handlers::extract_profile_handler(request, services).await
}

#[post("/applications", data = "<profile>")]
pub async fn submit_application(
    profile: Json<ConsultantProfile>,
    services: &State<Services>,
) -> ApiResult<ActionResponse> {
    handlers::submit_application_handler(profile, services).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be processed".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec!["Verify field names and value types".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the API under `/api` without launching it.
pub fn build_rocket(figment: Figment, services: Services) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(services)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable_entity, internal_error],
        )
        .mount(
            "/api",
            routes![
                search_consultants,
                featured_consultants,
                filter_options,
                get_consultant,
                related_consultants,
                quote,
                start_checkout,
                get_checkout,
                update_checkout,
                submit_checkout,
                back_checkout,
                close_checkout,
                list_projects,
                dashboard_stats,
                extract_profile,
                submit_application,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let services = Services::from_config(&config).await?;

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address))
        .merge(("port", config.server.port))
        .merge(("cli_colors", !config.is_production()));

    info!("Starting Vixia API server");
    info!(
        "Server: http://{}:{}/api",
        config.server.address, config.server.port
    );
    info!(
        "Profile extraction: {}",
        if services.extractor.is_configured() {
            config.gateway.model.as_str()
        } else {
            "disabled"
        }
    );

    if let Err(e) = build_rocket(figment, services).launch().await {
        anyhow::bail!("Rocket server failed: {}", e);
    }

    Ok(())
}
