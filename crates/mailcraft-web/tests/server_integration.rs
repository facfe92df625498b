//! Integration tests for the mailcraft-web server.
//!
//! These tests start a real axum server on a random port with stub
//! providers and exercise the REST endpoints over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use mailcraft_core::catalog::CatalogStore;
use mailcraft_core::{GenerationRequest, GenerationResponse};
use mailcraft_providers::{
    EmailGenerator, EmailProvider, ProviderError, ProviderRegistry, UpstreamError,
};
use mailcraft_web::{build_router, start_server, AppState};
use serde_json::{json, Value};

/// Replies with a fixed email, honouring `includePreheader`.
struct StubProvider;

#[async_trait]
impl EmailProvider for StubProvider {
    fn display_name(&self) -> &str {
        "Stub"
    }

    fn credential_key(&self) -> &str {
        "MAILCRAFT_WEB_TEST_STUB_KEY"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        Ok(GenerationResponse {
            subject: "Hi!".into(),
            preheader: request.include_preheader.then(|| "Welcome".to_string()),
            body: "<p>Hi</p>".into(),
            word_count: 5,
            reading_time: "1 min".into(),
            conversion_score: 8.0,
        })
    }
}

/// Always fails as if the API key were rejected.
struct RejectingProvider;

#[async_trait]
impl EmailProvider for RejectingProvider {
    fn display_name(&self) -> &str {
        "Rejecting"
    }

    fn credential_key(&self) -> &str {
        "MAILCRAFT_WEB_TEST_REJECTING_KEY"
    }

    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        Err(ProviderError::UpstreamCall {
            provider: "Rejecting".into(),
            source: UpstreamError::Status {
                status: 401,
                body: "invalid key".into(),
            },
        })
    }
}

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server() -> String {
    let registry = ProviderRegistry::builder()
        .register("primary-provider", Arc::new(StubProvider))
        .register("rejecting", Arc::new(RejectingProvider))
        .build();
    let state = AppState {
        generator: EmailGenerator::new(Arc::new(registry)),
        catalog: Arc::new(CatalogStore::in_memory()),
        default_provider: "primary-provider".into(),
    };

    let addr = start_server(build_router(state), ([127, 0, 0, 1], 0).into())
        .await
        .unwrap();
    format!("http://{addr}")
}

fn generation_body(include_preheader: bool) -> Value {
    json!({
        "emailType": "welcome",
        "clientTone": "friendly",
        "productName": "Acme Widget",
        "productDescription": "A widget",
        "productLink": "https://x.test/w",
        "targetAudience": "new users",
        "includePreheader": include_preheader,
        "aiProvider": "primary-provider"
    })
}

// ── Generation ───────────────────────────────────────────────────────

#[tokio::test]
async fn ai_providers_lists_registered() {
    let base = spawn_test_server().await;

    let resp = reqwest::get(format!("{base}/api/ai-providers")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let json: Value = resp.json().await.unwrap();
    let providers = json["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["name"], "Stub");
    assert_eq!(providers[0]["key"], "MAILCRAFT_WEB_TEST_STUB_KEY");
    assert_eq!(providers[0]["available"], false);
}

#[tokio::test]
async fn generate_email_returns_canonical_response() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate-email"))
        .json(&generation_body(true))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        json!({
            "subject": "Hi!",
            "preheader": "Welcome",
            "body": "<p>Hi</p>",
            "wordCount": 5,
            "readingTime": "1 min",
            "conversionScore": 8.0
        })
    );
}

#[tokio::test]
async fn generate_email_omits_preheader_when_not_requested() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let json: Value = client
        .post(format!("{base}/api/generate-email"))
        .json(&generation_body(false))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(json.get("preheader").is_none());
    assert_eq!(json["subject"], "Hi!");
}

#[tokio::test]
async fn generate_email_uses_default_provider() {
    let base = spawn_test_server().await;

    let mut body = generation_body(false);
    body.as_object_mut().unwrap().remove("aiProvider");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate-email"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn generate_email_validation_errors_are_400() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate-email"))
        .json(&json!({ "emailType": "welcome", "productLink": "not a url" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], "Invalid input data");
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"clientTone"));
    assert!(fields.contains(&"productLink"));
    assert!(!fields.contains(&"emailType"));
}

#[tokio::test]
async fn generate_email_malformed_json_is_400() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate-email"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn generate_email_wrong_field_type_names_the_field() {
    let base = spawn_test_server().await;

    let mut body = generation_body(false);
    body["includePreheader"] = json!("yes");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate-email"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], "Invalid input data");
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "includePreheader");
    assert!(errors[0]["message"]
        .as_str()
        .unwrap()
        .contains("expected a boolean"));
}

#[tokio::test]
async fn generate_email_unknown_provider_is_400() {
    let base = spawn_test_server().await;

    let mut body = generation_body(false);
    body["aiProvider"] = json!("claude");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate-email"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], "AI provider 'claude' not found");
}

#[tokio::test]
async fn generate_email_failure_is_500_naming_provider() {
    let base = spawn_test_server().await;

    let mut body = generation_body(false);
    body["aiProvider"] = json!("rejecting");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate-email"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json["message"],
        "Failed to generate the email with rejecting. Verify your API key."
    );
    assert!(json.get("errors").is_none());
}

// ── Catalog ──────────────────────────────────────────────────────────

fn new_client() -> Value {
    json!({
        "name": "Ana",
        "company": "Acme",
        "email": "ana@acme.test",
        "industry": "Retail",
        "targetAudience": "Shoppers",
        "brandVoice": "Warm",
        "communicationStyle": "Direct",
        "keyValues": "Quality",
        "painPoints": "Churn"
    })
}

fn new_product(client_id: u64) -> Value {
    json!({
        "clientId": client_id,
        "name": "Widget",
        "description": "A widget",
        "category": "Tools",
        "benefits": "Saves time",
        "features": "Fast",
        "targetMarket": "SMB"
    })
}

#[tokio::test]
async fn client_crud_lifecycle() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/clients"))
        .json(&new_client())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_u64().unwrap();
    assert_eq!(created["company"], "Acme");

    let resp = client
        .put(format!("{base}/api/clients/{id}"))
        .json(&json!({ "company": "Acme Corp" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["company"], "Acme Corp");
    assert_eq!(updated["name"], "Ana");

    let fetched: Value = reqwest::get(format!("{base}/api/clients/{id}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["company"], "Acme Corp");

    let resp = client
        .delete(format!("{base}/api/clients/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = reqwest::get(format!("{base}/api/clients/{id}")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn client_validation_is_400_with_errors() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/clients"))
        .json(&json!({ "name": "Ana" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: Value = resp.json().await.unwrap();
    assert!(!json["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn product_with_non_numeric_client_is_field_error() {
    let base = spawn_test_server().await;

    let mut body = new_product(1);
    body["clientId"] = json!("abc");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/products"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["errors"][0]["field"], "clientId");
}

#[tokio::test]
async fn products_belong_to_clients() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/products"))
        .json(&new_product(42))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let owner: Value = client
        .post(format!("{base}/api/clients"))
        .json(&new_client())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let owner_id = owner["id"].as_u64().unwrap();

    let resp = client
        .post(format!("{base}/api/products"))
        .json(&new_product(owner_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let listed: Value = reqwest::get(format!("{base}/api/clients/{owner_id}/products"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Widget");

    // A client with products cannot be deleted.
    let resp = client
        .delete(format!("{base}/api/clients/{owner_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn active_copywriters_filter() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    for (name, active) in [("Halbert", true), ("Retired", false)] {
        let resp = client
            .post(format!("{base}/api/copywriters"))
            .json(&json!({
                "name": name,
                "style": "Storytelling",
                "description": "Classic",
                "techniques": "Hooks",
                "bestFor": "Sales letters",
                "tone": "Bold",
                "approach": "Emotional",
                "isActive": active
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let all: Value = reqwest::get(format!("{base}/api/copywriters"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let active: Value = reqwest::get(format!("{base}/api/copywriters/active"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["name"], "Halbert");
}

#[tokio::test]
async fn missing_records_are_404() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    assert_eq!(
        reqwest::get(format!("{base}/api/products/7")).await.unwrap().status(),
        404
    );
    assert_eq!(
        client
            .delete(format!("{base}/api/copywriters/7"))
            .send()
            .await
            .unwrap()
            .status(),
        404
    );
    assert_eq!(
        client
            .put(format!("{base}/api/products/7"))
            .json(&json!({ "name": "x" }))
            .send()
            .await
            .unwrap()
            .status(),
        404
    );
}
