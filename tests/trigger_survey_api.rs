mod common;

use common::{FakeProvider, SENDER_NUMBER, SURVEY_LINK, spawn_app};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn post_trigger(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/trigger-survey", base))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_trigger_sends_whatsapp_invitation() {
    let provider = FakeProvider::succeeding();
    let base = spawn_app(provider.clone()).await;

    let response = post_trigger(
        &base,
        json!({"customer_name": "Aisha", "mobile_number": "+971500000000"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["to"], "+971500000000");
    assert!(body["sid"].as_str().unwrap().starts_with("SM"));

    assert_eq!(provider.calls(), 1);
    let sent = provider.sent();
    assert_eq!(sent[0].to, "whatsapp:+971500000000");
    assert_eq!(sent[0].from, format!("whatsapp:{}", SENDER_NUMBER));
    assert_eq!(
        sent[0].body,
        format!(
            "Hi Aisha, thank you for using our service. Please share your feedback: \
             {}#first_name=Aisha&phone_number=+971500000000",
            SURVEY_LINK
        )
    );
}

#[tokio::test]
async fn test_trigger_retries_until_provider_accepts() {
    let provider = FakeProvider::failing_first(2);
    let base = spawn_app(provider.clone()).await;

    let response = post_trigger(
        &base,
        json!({"customer_name": "Omar", "mobile_number": "+14155550100"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_trigger_gives_up_after_three_attempts() {
    let provider = FakeProvider::always_failing();
    let base = spawn_app(provider.clone()).await;

    let response = post_trigger(
        &base,
        json!({"customer_name": "Omar", "mobile_number": "+14155550100"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"detail": "All message attempts failed."}));
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_missing_field_is_rejected_without_sending() {
    let provider = FakeProvider::succeeding();
    let base = spawn_app(provider.clone()).await;

    let response = post_trigger(&base, json!({"customer_name": "Aisha"})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("mobile_number"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_wrong_type_is_rejected_without_sending() {
    let provider = FakeProvider::succeeding();
    let base = spawn_app(provider.clone()).await;

    let response = post_trigger(
        &base,
        json!({"customer_name": "Aisha", "mobile_number": 971500000000u64}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_empty_values_report_field_errors() {
    let provider = FakeProvider::succeeding();
    let base = spawn_app(provider.clone()).await;

    let response = post_trigger(&base, json!({"customer_name": "", "mobile_number": ""})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["customer_name", "mobile_number"]);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let base = spawn_app(FakeProvider::succeeding()).await;
    let client = reqwest::Client::new();

    let echoed = client
        .get(format!("{}/health/live", base))
        .header("x-request-id", "trace-abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(echoed.status(), StatusCode::OK);
    assert_eq!(echoed.headers()["x-request-id"], "trace-abc-123");

    let generated = client
        .get(format!("{}/health/live", base))
        .send()
        .await
        .unwrap();
    let id = generated.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_health_reports_provider_check() {
    let base = spawn_app(FakeProvider::succeeding()).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["fake"]["status"], "healthy");

    let ready = reqwest::get(format!("{}/health/ready", base)).await.unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_lists_trigger_route() {
    let base = spawn_app(FakeProvider::succeeding()).await;

    let response = reqwest::get(format!("{}/openapi.json", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc: Value = response.json().await.unwrap();
    assert!(doc["paths"]["/trigger-survey"]["post"].is_object());
    assert!(doc["paths"]["/health"]["get"].is_object());
    assert_eq!(
        doc["components"]["schemas"]["HealthStatus"]["enum"],
        json!(["healthy", "unhealthy"])
    );
}

#[tokio::test]
async fn test_missing_customer_name_is_rejected_without_sending() {
    let provider = FakeProvider::succeeding();
    let base = spawn_app(provider.clone()).await;

    let response = post_trigger(&base, json!({"mobile_number": "+971500000000"})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("customer_name"));
    assert_eq!(provider.calls(), 0);
}
