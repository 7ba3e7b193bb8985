use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

use vixia::extraction::{HttpExtractionClient, ProfileExtractionFlow, SimulatedSubmitter};
use vixia::types::ConsultantProfile;

const PROFILE_TEXT: &str = "Dr. Raj Patel\nPharmacovigilance Expert\nMumbai, India\nSignal detection lead";

fn client_for(server: &MockServer) -> HttpExtractionClient {
    HttpExtractionClient::new(server.url("/api/extract-profile"), Duration::from_secs(5)).unwrap()
}

fn edited_profile() -> ConsultantProfile {
    ConsultantProfile {
        name: Some("Raj".to_string()),
        bio: Some("Typed by hand".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_short_text_makes_no_call() {
    let server = MockServer::start_async().await;
    let endpoint = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/extract-profile");
            then.status(200).json_body(json!({"success": true, "data": {}}));
        })
        .await;

    let mut flow = ProfileExtractionFlow::new();
    *flow.profile_mut() = edited_profile();
    flow.set_text("Dr. Raj Patel");

    let notice = flow.extract(&client_for(&server)).await.unwrap();
    assert_eq!(notice.title, "Too short");
    assert_eq!(flow.profile(), &edited_profile());
    endpoint.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_collaborator_error_leaves_model_unchanged() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/extract-profile");
            then.status(200).json_body(json!({"success": false, "error": "x"}));
        })
        .await;

    let mut flow = ProfileExtractionFlow::new();
    *flow.profile_mut() = edited_profile();
    flow.set_text(PROFILE_TEXT);

    let notice = flow.extract(&client_for(&server)).await.unwrap();
    assert_eq!(notice.title, "Extraction failed");
    assert_eq!(notice.description, "x");
    assert_eq!(flow.profile(), &edited_profile());
    assert!(!flow.is_extracted());
    assert!(!flow.is_extracting());
}

#[tokio::test]
async fn test_error_status_with_json_body_surfaces_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/extract-profile");
            then.status(500)
                .json_body(json!({"success": false, "error": "AI gateway not configured"}));
        })
        .await;

    let mut flow = ProfileExtractionFlow::new();
    flow.set_text(PROFILE_TEXT);

    let notice = flow.extract(&client_for(&server)).await.unwrap();
    assert_eq!(notice.description, "AI gateway not configured");
}

#[tokio::test]
async fn test_non_json_failure_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/extract-profile");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let mut flow = ProfileExtractionFlow::new();
    *flow.profile_mut() = edited_profile();
    flow.set_text(PROFILE_TEXT);

    let notice = flow.extract(&client_for(&server)).await.unwrap();
    assert!(notice.is_error());
    assert_eq!(
        notice.description,
        "Could not extract profile. Try entering details manually."
    );
    assert_eq!(flow.profile(), &edited_profile());
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/extract-profile");
            then.status(200).body("{not json");
        })
        .await;

    let mut flow = ProfileExtractionFlow::new();
    flow.set_text(PROFILE_TEXT);

    let notice = flow.extract(&client_for(&server)).await.unwrap();
    assert_eq!(notice.title, "Error");
    assert_eq!(notice.description, "Something went wrong. Please try again.");
}

#[tokio::test]
async fn test_extract_edit_and_submit() {
    let server = MockServer::start_async().await;
    let endpoint = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/extract-profile")
                .json_body(json!({"profileText": PROFILE_TEXT}));
            then.status(200).json_body(json!({
                "type": "data",
                "success": true,
                "message": "Profile extracted",
                "data": {
                    "name": "Dr. Raj Patel",
                    "title": "Pharmacovigilance Expert",
                    "location": null,
                    "expertise": ["Signal Detection", "REMS Programs"],
                    "yearsExperience": 18
                }
            }));
        })
        .await;

    let mut flow = ProfileExtractionFlow::new();
    flow.set_text(PROFILE_TEXT);

    let notice = flow.extract(&client_for(&server)).await.unwrap();
    assert_eq!(notice.title, "Profile extracted!");
    assert!(flow.is_extracted());
    assert_eq!(flow.profile().years_experience, Some(18));
    endpoint.assert_async().await;

    let submitter = SimulatedSubmitter::new(Duration::from_millis(1));
    let notice = flow.submit(&submitter).await.unwrap();
    assert_eq!(notice.title, "Missing Information");
    assert!(flow.is_extracted());

    flow.profile_mut().location = Some("Mumbai, India".to_string());
    let notice = flow.submit(&submitter).await.unwrap();
    assert_eq!(notice.title, "Application Submitted!");
    assert!(flow.profile().is_empty());
    assert!(flow.text().is_empty());
    assert!(!flow.is_extracted());
}
