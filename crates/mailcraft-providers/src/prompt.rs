//! Prompt builder: renders a generation request into model instructions.
//!
//! Pure and deterministic: the same request always yields the same prompt.
//! Section order is fixed:
//!
//! 1. role framing
//! 2. persona clause (or the generic-technique fallback)
//! 3. email-type clause and the request fields verbatim
//! 4. optional "avoid" clause
//! 5. five-point quality checklist, with the product link in the CTA item
//! 6. literal example of the JSON reply shape

use mailcraft_core::styles::{self, GENERAL_PERSONA};
use mailcraft_core::GenerationRequest;
use serde_json::{json, Value};

use crate::error::PromptError;

const ROLE_FRAMING: &str = "You are a professional persuasive copywriter, \
an expert in conversion-focused writing and persuasion techniques.";

const GENERIC_TECHNIQUE: &str = "Use general professional copywriting techniques.";

const RESPONSE_EXAMPLE: &str = r#"{
  "subject": "Catchy, persuasive subject line",
  "preheader": "Preheader text that complements the subject",
  "body": "Full email body in clean HTML with <p> paragraphs, <h3> headings if needed, and a prominent call to action",
  "wordCount": number_of_words,
  "readingTime": "X min",
  "conversionScore": score_from_1_to_10
}"#;

/// A rendered prompt: the instruction text plus the reply schema used for
/// schema-guided generation.
#[derive(Clone, Debug, PartialEq)]
pub struct EmailPrompt {
    pub instruction: String,
    pub response_schema: Value,
}

/// JSON Schema of the reply. Every field is required except `preheader`.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "subject": { "type": "string" },
            "preheader": { "type": "string" },
            "body": { "type": "string" },
            "wordCount": { "type": "number" },
            "readingTime": { "type": "string" },
            "conversionScore": { "type": "number" }
        },
        "required": ["subject", "body", "wordCount", "readingTime", "conversionScore"]
    })
}

/// Resolve the persona clause. Absent, blank and `"general"` all mean
/// "no persona".
fn persona_clause(profile: Option<&str>) -> Result<String, PromptError> {
    match profile {
        None => Ok(GENERIC_TECHNIQUE.to_string()),
        Some(GENERAL_PERSONA) => Ok(GENERIC_TECHNIQUE.to_string()),
        Some(key) => styles::find_persona(key)
            .map(|persona| format!("Adopt this style: {}", persona.directive))
            .ok_or_else(|| PromptError::UnknownCategoryKey {
                field: "copywriterProfile",
                value: key.to_string(),
            }),
    }
}

/// Render the prompt for `request`.
///
/// Fails with [`PromptError::UnknownCategoryKey`] when `emailType` or
/// `copywriterProfile` is not in the static tables.
pub fn build_prompt(request: &GenerationRequest) -> Result<EmailPrompt, PromptError> {
    let email_type = styles::find_email_type(&request.email_type).ok_or_else(|| {
        PromptError::UnknownCategoryKey {
            field: "emailType",
            value: request.email_type.clone(),
        }
    })?;
    let persona = persona_clause(request.persona_key())?;

    let mut out = String::with_capacity(2048);
    out.push_str(ROLE_FRAMING);
    out.push('\n');
    out.push_str(&persona);
    out.push_str("\n\n");

    out.push_str(&format!(
        "Write a {} with the following characteristics:\n",
        email_type.description
    ));
    out.push_str(&format!("- Tone: {}\n", request.client_tone));
    out.push_str(&format!("- Product: {}\n", request.product_name));
    out.push_str(&format!("- Description: {}\n", request.product_description));
    out.push_str(&format!("- Audience: {}\n", request.target_audience));
    if let Some(avoid) = request.avoid_clause() {
        out.push_str(&format!("- AVOID: {}\n", avoid));
    }

    out.push_str("\nThe email must:\n");
    out.push_str("1. Grab attention from the subject line\n");
    out.push_str("2. Create an emotional connection\n");
    out.push_str("3. Present the value of the product\n");
    out.push_str(&format!(
        "4. Include a persuasive call to action with the link: {}\n",
        request.product_link
    ));
    out.push_str("5. Create urgency where appropriate\n");

    out.push_str("\nRespond in JSON with this exact structure:\n");
    out.push_str(RESPONSE_EXAMPLE);

    Ok(EmailPrompt {
        instruction: out,
        response_schema: response_schema(),
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
