//! Email provider trait: the uniform contract over external AI services.
//!
//! Every backend (Gemini, OpenAI, test stubs) implements this trait and is
//! looked up by name through the [`ProviderRegistry`](crate::ProviderRegistry).

use async_trait::async_trait;
use mailcraft_core::{GenerationRequest, GenerationResponse, ProviderDescriptor};

use crate::error::ProviderError;

/// Whether the environment variable `key` currently holds a non-empty value.
///
/// Read on every call; credentials may be supplied or rotated at runtime.
pub fn credential_available(key: &str) -> bool {
    std::env::var(key)
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false)
}

/// Trait that all email-generation providers must implement.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Display name for logging and the availability catalog.
    fn display_name(&self) -> &str;

    /// Name of the environment variable holding this provider's API key.
    fn credential_key(&self) -> &str;

    /// Generate one email.
    ///
    /// Exactly one upstream call, no retries. On failure no partial response
    /// is produced.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError>;

    /// Availability entry, with `available` evaluated now.
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: self.display_name().to_string(),
            key: self.credential_key().to_string(),
            available: credential_available(self.credential_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_credential_available() {
        temp_env::with_var("MAILCRAFT_TEST_KEY", Some("secret"), || {
            assert!(credential_available("MAILCRAFT_TEST_KEY"));
        });
        temp_env::with_var("MAILCRAFT_TEST_KEY", Some("  "), || {
            assert!(!credential_available("MAILCRAFT_TEST_KEY"));
        });
        temp_env::with_var_unset("MAILCRAFT_TEST_KEY", || {
            assert!(!credential_available("MAILCRAFT_TEST_KEY"));
        });
    }
}
