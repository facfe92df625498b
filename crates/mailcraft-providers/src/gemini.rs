//! Gemini adapter: Google's `generateContent` REST API with
//! schema-constrained JSON output.

use async_trait::async_trait;
use mailcraft_core::config::schema::ProviderConfig;
use mailcraft_core::{GenerationRequest, GenerationResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ProviderError, UpstreamError};
use crate::http;
use crate::prompt::{build_prompt, EmailPrompt};
use crate::reply::normalize_reply;
use crate::traits::EmailProvider;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

const DISPLAY_NAME: &str = "Gemini";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini's schema dialect spells types in upper case (`"OBJECT"`,
/// `"STRING"`, ...).
fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = match (k.as_str(), v) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => to_gemini_schema(v),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

// ─────────────────────────────────────────────
// GeminiProvider
// ─────────────────────────────────────────────

pub struct GeminiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("has_key", &!self.api_key.is_empty())
            .finish()
    }
}

impl GeminiProvider {
    /// Create the adapter, reading the API key from `GEMINI_API_KEY`.
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let api_key = std::env::var(GEMINI_KEY_ENV).unwrap_or_default();
        Self::with_api_key(config, api_key)
    }

    /// Create the adapter with an explicit API key.
    pub fn with_api_key(
        config: &ProviderConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Ok(GeminiProvider {
            client: http::build_client(config.timeout_secs)?,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            api_key: api_key.into(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
        })
    }

    fn generate_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/models/{}:generateContent", base, self.model)
    }

    fn request_body(prompt: &EmailPrompt) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt.instruction }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": to_gemini_schema(&prompt.response_schema)
            }
        })
    }
}

#[async_trait]
impl EmailProvider for GeminiProvider {
    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    fn credential_key(&self) -> &str {
        GEMINI_KEY_ENV
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let prompt = build_prompt(request)?;

        if self.api_key.trim().is_empty() {
            return Err(ProviderError::upstream(
                DISPLAY_NAME,
                UpstreamError::MissingCredential(GEMINI_KEY_ENV.to_string()),
            ));
        }

        debug!(
            provider = DISPLAY_NAME,
            model = %self.model,
            email_type = %request.email_type,
            "Calling Gemini"
        );

        let call = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(&prompt));
        let body = http::send(DISPLAY_NAME, call).await?;

        let reply: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(DISPLAY_NAME, e.to_string()))?;

        normalize_reply(DISPLAY_NAME, &reply.text(), request)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
