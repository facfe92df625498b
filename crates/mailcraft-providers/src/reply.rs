//! Reply parsing and normalization.
//!
//! Models often wrap JSON in markdown fences or chat around it, even when
//! asked for schema-constrained output. [`extract_json`] recovers the first
//! JSON object from such text; [`normalize`] fills in fallbacks so every
//! adapter returns the same canonical shape.

use mailcraft_core::{GenerationRequest, GenerationResponse};
use serde_json::{Map, Value};

use crate::error::ProviderError;

pub const FALLBACK_SUBJECT: &str = "Generated email";
pub const FALLBACK_BODY: &str = "Email content";
pub const FALLBACK_READING_TIME: &str = "1 min";
pub const FALLBACK_CONVERSION_SCORE: f64 = 7.5;

/// Extract a JSON value from model output.
///
/// Tries, in order:
/// 1. The whole (trimmed) text
/// 2. A ` ```json ` or bare ` ``` ` fenced block
/// 3. The first balanced `{...}` that parses
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(inner) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(inner) {
            return Some(value);
        }
    }

    for (start, _) in trimmed.match_indices('{') {
        if let Some(candidate) = balanced_object(&trimmed[start..]) {
            if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                return Some(value);
            }
        }
    }

    None
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let end = after.find("```")?;
    Some(after[..end].trim())
}

/// Slice from the leading `{` to its matching `}`, honouring string
/// literals and escapes.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (idx, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse raw model output into a JSON object.
pub fn parse_reply(provider: &str, raw: &str) -> Result<Map<String, Value>, ProviderError> {
    if raw.trim().is_empty() {
        return Err(ProviderError::malformed(provider, "empty reply"));
    }
    match extract_json(raw) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ProviderError::malformed(
            provider,
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
        None => Err(ProviderError::malformed(provider, "reply is not valid JSON")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The string at `key` as the model sent it, unless it is blank.
fn non_empty_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn word_count(fields: &Map<String, Value>) -> u32 {
    fields
        .get("wordCount")
        .and_then(as_number)
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.round().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

fn reading_time(fields: &Map<String, Value>) -> String {
    if let Some(text) = non_empty_str(fields, "readingTime") {
        return text.to_string();
    }
    match fields.get("readingTime") {
        Some(Value::Number(n)) => format!("{} min", n),
        _ => FALLBACK_READING_TIME.to_string(),
    }
}

fn conversion_score(fields: &Map<String, Value>) -> f64 {
    fields
        .get("conversionScore")
        .and_then(as_number)
        .filter(|n| n.is_finite() && *n != 0.0)
        .unwrap_or(FALLBACK_CONVERSION_SCORE)
}

/// Build the canonical response from parsed reply fields.
///
/// The preheader is kept only when the request asked for it, whatever the
/// model returned.
pub fn normalize(fields: &Map<String, Value>, request: &GenerationRequest) -> GenerationResponse {
    let preheader = if request.include_preheader {
        non_empty_str(fields, "preheader").map(String::from)
    } else {
        None
    };

    GenerationResponse {
        subject: non_empty_str(fields, "subject")
            .unwrap_or(FALLBACK_SUBJECT)
            .to_string(),
        preheader,
        body: non_empty_str(fields, "body").unwrap_or(FALLBACK_BODY).to_string(),
        word_count: word_count(fields),
        reading_time: reading_time(fields),
        conversion_score: conversion_score(fields),
    }
}

/// [`parse_reply`] followed by [`normalize`].
pub fn normalize_reply(
    provider: &str,
    raw: &str,
    request: &GenerationRequest,
) -> Result<GenerationResponse, ProviderError> {
    let fields = parse_reply(provider, raw)?;
    Ok(normalize(&fields, request))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
