//! Generation endpoint handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mailcraft_core::catalog::CatalogStore;
use mailcraft_core::{FieldError, GenerationRequest, GenerationResponse, ProviderDescriptor};
use mailcraft_providers::EmailGenerator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub generator: EmailGenerator,
    pub catalog: Arc<CatalogStore>,
    /// Registry key used when a request names no provider.
    pub default_provider: String,
}

/// Decode a JSON body into `T`.
///
/// Unparseable JSON is a plain 400. A wrong-typed field is a validation
/// error naming that field.
pub(crate) fn json_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    serde_path_to_error::deserialize(value).map_err(|err| {
        let field = err.path().to_string();
        let message = err.into_inner().to_string();
        if field == "." {
            ApiError::BadRequest(message)
        } else {
            ApiError::validation(vec![FieldError::new(field, message)])
        }
    })
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderDescriptor>,
}

/// GET /api/ai-providers: every registered provider with live credential
/// availability.
pub async fn list_providers(State(app): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: app.generator.registry().list_available(),
    })
}

/// POST /api/generate-email: validate the request and run one generation.
///
/// 400 with per-field errors on invalid input or an unknown provider,
/// 500 naming the provider when generation fails.
pub async fn generate_email(
    State(app): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let request: GenerationRequest = json_body(payload)?;
    request.validate().map_err(ApiError::validation)?;

    let provider = request.provider_or(&app.default_provider);
    let response = app.generator.generate_email(&request, provider).await?;
    info!(
        provider,
        email_type = %request.email_type,
        words = response.word_count,
        "Email generated"
    );
    Ok(Json(response))
}
