//! OpenAI adapter: `/chat/completions` with a `json_schema` response format.

use async_trait::async_trait;
use mailcraft_core::config::schema::ProviderConfig;
use mailcraft_core::{GenerationRequest, GenerationResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ProviderError, UpstreamError};
use crate::http;
use crate::prompt::{build_prompt, EmailPrompt};
use crate::reply::normalize_reply;
use crate::traits::EmailProvider;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
/// Older deployments set this instead; only consulted at construction.
pub const OPENAI_LEGACY_KEY_ENV: &str = "OPENAI_KEY";

const DISPLAY_NAME: &str = "OpenAI";
const TEMPERATURE: f64 = 0.8;
const MAX_TOKENS: u32 = 2000;

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: Value,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

// ─────────────────────────────────────────────
// OpenAiProvider
// ─────────────────────────────────────────────

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("has_key", &!self.api_key.is_empty())
            .finish()
    }
}

impl OpenAiProvider {
    /// Create the adapter, reading the API key from `OPENAI_API_KEY`
    /// (falling back to `OPENAI_KEY`).
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let api_key = std::env::var(OPENAI_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(OPENAI_LEGACY_KEY_ENV).ok())
            .unwrap_or_default();
        Self::with_api_key(config, api_key)
    }

    /// Create the adapter with an explicit API key.
    pub fn with_api_key(
        config: &ProviderConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Ok(OpenAiProvider {
            client: http::build_client(config.timeout_secs)?,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| OPENAI_API_BASE.to_string()),
            api_key: api_key.into(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
        })
    }

    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    fn request_body<'a>(
        &'a self,
        prompt: &'a EmailPrompt,
        user_message: &'a str,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "email_response",
                    "schema": prompt.response_schema
                }
            }),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl EmailProvider for OpenAiProvider {
    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    fn credential_key(&self) -> &str {
        OPENAI_KEY_ENV
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let prompt = build_prompt(request)?;

        if self.api_key.trim().is_empty() {
            return Err(ProviderError::upstream(
                DISPLAY_NAME,
                UpstreamError::MissingCredential(OPENAI_KEY_ENV.to_string()),
            ));
        }

        debug!(
            provider = DISPLAY_NAME,
            model = %self.model,
            email_type = %request.email_type,
            "Calling OpenAI"
        );

        let user_message = format!(
            "Generate a professional email with link: {}",
            request.product_link
        );
        let call = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(&prompt, &user_message));
        let body = http::send(DISPLAY_NAME, call).await?;

        let reply: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(DISPLAY_NAME, e.to_string()))?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        normalize_reply(DISPLAY_NAME, &content, request)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: &str) -> ProviderConfig {
        ProviderConfig {
            api_base: Some(api_base.to_string()),
            ..Default::default()
        }
    }

    fn request() -> GenerationRequest {
        serde_json::from_value(json!({
            "emailType": "cart-abandonment",
            "clientTone": "urgent",
            "productName": "Acme Widget",
            "productDescription": "A widget",
            "productLink": "https://x.test/w",
            "targetAudience": "shoppers",
            "copywriterProfile": "dan-kennedy",
            "aiProvider": "openai"
        }))
        .unwrap()
    }

    fn completion(content: Option<&str>) -> Value {
        json!({
            "id": "chatcmpl-test",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_completions_url_trailing_slash() {
        let provider = OpenAiProvider::with_api_key(&config("https://api.openai.com/v1/"), "k").unwrap();
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_default_model_and_base() {
        let provider = OpenAiProvider::with_api_key(&ProviderConfig::default(), "k").unwrap();
        assert_eq!(provider.api_base, OPENAI_API_BASE);
        assert_eq!(provider.model, "gpt-4o");
    }

    #[test]
    #[serial]
    fn test_new_falls_back_to_legacy_key() {
        temp_env::with_vars(
            [(OPENAI_KEY_ENV, None), (OPENAI_LEGACY_KEY_ENV, Some("legacy"))],
            || {
                let provider = OpenAiProvider::new(&ProviderConfig::default()).unwrap();
                assert_eq!(provider.api_key, "legacy");
                // Availability only looks at the declared credential.
                assert!(!provider.descriptor().available);
            },
        );
    }

    #[tokio::test]
    async fn test_generate_sends_schema_and_parses_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "temperature": 0.8,
                "max_tokens": 2000,
                "response_format": { "type": "json_schema" },
                "messages": [
                    { "role": "system" },
                    { "role": "user", "content": "Generate a professional email with link: https://x.test/w" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(Some(
                r#"{"subject":"Still thinking?","preheader":"P","body":"<p>Come back</p>","wordCount":42,"readingTime":"1 min","conversionScore":9}"#,
            ))))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_api_key(&config(&server.uri()), "sk-test").unwrap();
        let resp = provider.generate(&request()).await.unwrap();

        assert_eq!(resp.subject, "Still thinking?");
        assert_eq!(resp.word_count, 42);
        assert_eq!(resp.conversion_score, 9.0);
        assert!(resp.preheader.is_none());
    }

    #[tokio::test]
    async fn test_null_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(None)))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_api_key(&config(&server.uri()), "k").unwrap();
        let err = provider.generate(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedReply { .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_api_key(&config(&server.uri()), "k").unwrap();
        let err = provider.generate(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedReply { .. }));
    }

    #[tokio::test]
    async fn test_rate_limit_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "Rate limit exceeded", "type": "rate_limit_error" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_api_key(&config(&server.uri()), "k").unwrap();
        let err = provider.generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("429"));
        assert!(matches!(err, ProviderError::UpstreamCall { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(Some("{}")))
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let cfg = ProviderConfig {
            api_base: Some(server.uri()),
            timeout_secs: 1,
            ..Default::default()
        };
        let provider = OpenAiProvider::with_api_key(&cfg, "k").unwrap();
        let err = provider.generate(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::UpstreamCall {
                source: UpstreamError::Transport(_),
                ..
            }
        ));
    }
}
