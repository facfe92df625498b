//! Core types for Mailcraft: the generation request, the canonical email
//! response, and provider descriptors.
//!
//! JSON on the wire uses **camelCase** keys, matching the web form.

use serde::{Deserialize, Serialize};

use crate::styles;

/// Registry key used when neither the request nor the config names a
/// provider.
pub const DEFAULT_PROVIDER: &str = "gemini";

// ─────────────────────────────────────────────
// Generation request
// ─────────────────────────────────────────────

/// Everything needed to generate one marketing email.
///
/// Created per incoming call and only ever passed by reference afterwards.
/// Text fields default to empty on deserialization so that a missing field
/// is reported by [`GenerationRequest::validate`] instead of failing the
/// whole body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Key into [`styles::EMAIL_TYPES`].
    #[serde(default)]
    pub email_type: String,
    #[serde(default)]
    pub client_tone: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
    /// Absolute http(s) URL embedded in the call to action.
    #[serde(default)]
    pub product_link: String,
    #[serde(default)]
    pub target_audience: String,
    /// Key into [`styles::PERSONAS`], or `"general"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copywriter_profile: Option<String>,
    /// Appended to the prompt as a negative constraint when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements_to_avoid: Option<String>,
    /// Whether the preheader is surfaced in the response.
    #[serde(default)]
    pub include_preheader: bool,
    /// Registry key of the provider to use.
    #[serde(rename = "aiProvider", default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
}

/// A single validation failure, reported per field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// camelCase field name as it appears in the request body.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl GenerationRequest {
    /// Check every field and return all violations at once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let required = [
            ("emailType", &self.email_type, "Email type is required"),
            ("clientTone", &self.client_tone, "Message tone is required"),
            ("productName", &self.product_name, "Product name is required"),
            (
                "productDescription",
                &self.product_description,
                "Product description is required",
            ),
            (
                "targetAudience",
                &self.target_audience,
                "Target audience is required",
            ),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, message));
            }
        }

        if !self.email_type.trim().is_empty() && styles::find_email_type(&self.email_type).is_none()
        {
            errors.push(FieldError::new(
                "emailType",
                format!("Unknown email type '{}'", self.email_type),
            ));
        }

        if let Some(profile) = self.persona_key() {
            if !styles::is_known_persona(profile) {
                errors.push(FieldError::new(
                    "copywriterProfile",
                    format!("Unknown copywriter profile '{}'", profile),
                ));
            }
        }

        if !is_valid_link(&self.product_link) {
            errors.push(FieldError::new(
                "productLink",
                "Product link must be a valid URL",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The requested provider, or `default` when none (or a blank one) was
    /// given.
    pub fn provider_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.provider_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
    }

    /// The trimmed `copywriterProfile`, or `None` when absent or blank.
    pub fn persona_key(&self) -> Option<&str> {
        self.copywriter_profile
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The `elementsToAvoid` value if it carries any text.
    pub fn avoid_clause(&self) -> Option<&str> {
        self.elements_to_avoid
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Absolute URL with an http(s) scheme and a host.
fn is_valid_link(link: &str) -> bool {
    match url::Url::parse(link.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

// ─────────────────────────────────────────────
// Generation response
// ─────────────────────────────────────────────

/// The canonical email, identical in shape whichever provider produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub subject: String,
    /// Present only when the request asked for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preheader: Option<String>,
    /// Simple inline HTML (`<p>`, `<h3>`), passed through unsanitized.
    pub body: String,
    pub word_count: u32,
    /// Free-form, e.g. `"2 min"`.
    pub reading_time: String,
    /// Nominally 1–10, provider-supplied.
    pub conversion_score: f64,
}

// ─────────────────────────────────────────────
// Provider descriptor
// ─────────────────────────────────────────────

/// One entry of the provider-availability catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Display name (e.g. `"Gemini"`).
    pub name: String,
    /// Name of the environment variable holding the credential.
    pub key: String,
    /// Whether that variable currently holds a non-empty value.
    pub available: bool,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
