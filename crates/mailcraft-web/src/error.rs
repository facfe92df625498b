//! HTTP error mapping.
//!
//! Every failing handler returns an [`ApiError`], rendered as
//! `{ "message": ..., "errors"?: [...] }` with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mailcraft_core::catalog::CatalogError;
use mailcraft_core::FieldError;
use mailcraft_providers::GenerationError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const INVALID_INPUT: &str = "Invalid input data";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::Validation {
            message: INVALID_INPUT.to_string(),
            errors,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errors = match &self {
            ApiError::Validation { errors, .. } => Some(errors.as_slice()),
            _ => None,
        };
        let message = self.to_string();
        let body = ErrorBody {
            message: &message,
            errors,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::UnknownProvider(e) => ApiError::BadRequest(e.to_string()),
            GenerationError::InvalidRequest(e) => ApiError::BadRequest(e.to_string()),
            // The message names the provider; the cause stays in the logs.
            failed @ GenerationError::GenerationFailed { .. } => {
                ApiError::Internal(failed.to_string())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CatalogError::UnknownClient(_) => ApiError::BadRequest(err.to_string()),
            CatalogError::ClientInUse(_) => ApiError::Conflict(err.to_string()),
            CatalogError::Invalid { errors, .. } => ApiError::validation(errors),
            CatalogError::Io { .. } | CatalogError::Serde(_) => {
                error!(error = %err, "Catalog storage failure");
                ApiError::Internal("Catalog storage failure".to_string())
            }
        }
    }
}
