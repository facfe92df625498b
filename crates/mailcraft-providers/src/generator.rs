//! Generation facade: the single entry point used by the web and CLI layers.

use std::sync::Arc;

use mailcraft_core::{GenerationRequest, GenerationResponse};
use tracing::{debug, error};

use crate::error::{GenerationError, ProviderError};
use crate::registry::ProviderRegistry;

/// Resolves a provider by name and runs one generation through it.
#[derive(Clone, Debug)]
pub struct EmailGenerator {
    registry: Arc<ProviderRegistry>,
}

impl EmailGenerator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Generate an email with the provider registered as `provider_name`.
    ///
    /// `UnknownProvider` passes through untouched; an unknown email type or
    /// persona becomes `InvalidRequest`; every other adapter failure is
    /// wrapped in `GenerationFailed` naming `provider_name`.
    pub async fn generate_email(
        &self,
        request: &GenerationRequest,
        provider_name: &str,
    ) -> Result<GenerationResponse, GenerationError> {
        let provider = self.registry.resolve(provider_name)?;
        debug!(
            provider = provider_name,
            email_type = %request.email_type,
            "Generating email"
        );

        match provider.generate(request).await {
            Ok(response) => Ok(response),
            Err(ProviderError::UnknownCategoryKey(e)) => Err(GenerationError::InvalidRequest(e)),
            Err(e) => {
                error!(provider = provider_name, error = %e, "Email generation failed");
                Err(GenerationError::GenerationFailed {
                    provider: provider_name.to_string(),
                    source: e,
                })
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
