mod common;

use rocket::http::{ContentType, Status};
use serde_json::{json, Value};
use std::time::Duration;

async fn get_json(client: &rocket::local::asynchronous::Client, uri: &str) -> (Status, Value) {
    let response = client.get(uri).dispatch().await;
    let status = response.status();
    (status, response.into_json::<Value>().await.unwrap())
}

fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let (status, body) = get_json(&client, "/api/health").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["type"], "text");
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn test_search_defaults_to_rating_order() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let (status, body) = get_json(&client, "/api/consultants").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body), vec![3, 1, 5, 2, 6, 4]);
    assert_eq!(body["data"][0]["hourlyRate"], 275);
}

#[tokio::test]
async fn test_country_switzerland_returns_basel_consultant() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let (_, body) = get_json(&client, "/api/consultants?country=Switzerland").await;
    assert_eq!(ids(&body), vec![3]);
    assert_eq!(body["data"][0]["location"], "Basel, CH");
}

#[tokio::test]
async fn test_all_sentinel_and_price_sort() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let (_, body) = get_json(
        &client,
        "/api/consultants?country=All&language=English&expertise=All&sort=price-low",
    )
    .await;
    let rates: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["hourlyRate"].as_u64().unwrap())
        .collect();
    assert_eq!(rates, vec![175, 195, 200, 230, 250, 275]);
}

#[tokio::test]
async fn test_unknown_sort_rejected() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let (status, body) = get_json(&client, "/api/consultants?sort=cheapest").await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["type"], "error");
    assert_eq!(body["error_code"], "INVALID_SORT");
}

#[tokio::test]
async fn test_profile_related_and_missing() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;

    let (status, body) = get_json(&client, "/api/consultants/3").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["name"], "Maria Gonzalez");

    let (_, body) = get_json(&client, "/api/consultants/3/related").await;
    assert_eq!(ids(&body), vec![1, 2, 4]);

    let (status, body) = get_json(&client, "/api/consultants/99").await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["error_code"], "CONSULTANT_NOT_FOUND");

    let (status, _) = get_json(&client, "/api/consultants/99/related").await;
    assert_eq!(status, Status::NotFound);
}

#[tokio::test]
async fn test_featured_and_filters() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;

    let (_, body) = get_json(&client, "/api/consultants/featured").await;
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    let (_, body) = get_json(&client, "/api/consultants/filters").await;
    assert_eq!(body["data"]["countries"][0], "All");
    assert_eq!(body["data"]["sort"][2]["key"], "price-low");
}

#[tokio::test]
async fn test_quote_rate_250_for_40_hours() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let response = client
        .post("/api/engagements/quote")
        .header(ContentType::JSON)
        .body(json!({"consultantId": 1}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["data"]["projectTitle"], "New Project");
    assert_eq!(body["data"]["estimatedHours"], 40);
    assert_eq!(body["data"]["totalAmount"], 10000);
    assert_eq!(body["data"]["platformFee"], 1000);
    assert_eq!(body["data"]["grandTotal"], 11000);
}

#[tokio::test]
async fn test_quote_validation() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;

    let response = client
        .post("/api/engagements/quote")
        .header(ContentType::JSON)
        .body(json!({"consultantId": 42}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);

    let response = client
        .post("/api/engagements/quote")
        .header(ContentType::JSON)
        .body(json!({"consultantId": 1, "estimatedHours": 0}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let response = client
        .post("/api/engagements/quote")
        .header(ContentType::JSON)
        .body(json!({"consultantId": 1, "estimatedHours": u32::MAX}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "INVALID_HOURS");
}

#[tokio::test]
async fn test_dashboard_projects_and_stats() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;

    let (_, body) = get_json(&client, "/api/dashboard/projects?status=active").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = get_json(&client, "/api/dashboard/projects?search=patel&status=all").await;
    assert_eq!(body["data"][0]["id"], "4");

    let (status, body) = get_json(&client, "/api/dashboard/projects?status=archived").await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error_code"], "INVALID_STATUS");

    let (_, body) = get_json(&client, "/api/dashboard/stats").await;
    assert_eq!(
        body["data"],
        json!({"active": 2, "completed": 1, "totalBudget": 78000, "totalSpent": 33300})
    );
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let (status, body) = get_json(&client, "/api/nowhere").await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_cors_headers() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;
    let response = client.options("/api/extract-profile").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
}

#[tokio::test]
async fn test_application_submission() {
    let client = common::client(common::services(None, Duration::from_millis(5))).await;

    let response = client
        .post("/api/applications")
        .header(ContentType::JSON)
        .body(json!({"name": "Jane Doe", "title": null}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["notice"]["title"], "Missing Information");

    let response = client
        .post("/api/applications")
        .header(ContentType::JSON)
        .body(
            json!({"name": "Jane Doe", "title": "Regulatory Lead", "location": "Basel", "yearsExperience": 12})
                .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["type"], "action");
    assert_eq!(body["notice"]["title"], "Application Submitted!");
}

struct OfflineSubmitter;

#[async_trait::async_trait]
impl vixia::extraction::ApplicationSubmitter for OfflineSubmitter {
    async fn submit(
        &self,
        _profile: &vixia::types::ConsultantProfile,
    ) -> Result<(), vixia::extraction::SubmissionError> {
        Err(vixia::extraction::SubmissionError::Unavailable(
            "review queue offline".to_string(),
        ))
    }
}

#[tokio::test]
async fn test_application_service_down() {
    let mut services = common::services(None, Duration::from_millis(5));
    services.applications = std::sync::Arc::new(OfflineSubmitter);
    let client = common::client(services).await;

    let response = client
        .post("/api/applications")
        .header(ContentType::JSON)
        .body(json!({"name": "Jane Doe", "title": "Regulatory Lead", "location": "Basel"}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "SUBMISSION_FAILED");
}
