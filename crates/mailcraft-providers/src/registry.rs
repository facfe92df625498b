//! Provider registry: name → adapter dispatch table.
//!
//! Built once at startup and immutable afterwards, so it can be shared
//! behind an `Arc` without locking. Names are matched case-insensitively.

use std::collections::HashMap;
use std::sync::Arc;

use mailcraft_core::config::schema::ProvidersConfig;
use mailcraft_core::ProviderDescriptor;
use tracing::debug;

use crate::error::UnknownProvider;
use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;
use crate::traits::EmailProvider;

/// Registry key of the Gemini adapter.
pub const GEMINI: &str = "gemini";
/// Registry key of the OpenAI adapter.
pub const OPENAI: &str = "openai";

// ─────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────

/// Collects adapters before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    order: Vec<String>,
    adapters: HashMap<String, Arc<dyn EmailProvider>>,
}

impl RegistryBuilder {
    /// Register `provider` under `name` (lowercased). A repeated name
    /// replaces the earlier adapter but keeps its position.
    pub fn register(mut self, name: &str, provider: Arc<dyn EmailProvider>) -> Self {
        let key = name.trim().to_lowercase();
        if self.adapters.insert(key.clone(), provider).is_none() {
            self.order.push(key);
        }
        self
    }

    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            order: self.order,
            adapters: self.adapters,
        }
    }
}

// ─────────────────────────────────────────────
// ProviderRegistry
// ─────────────────────────────────────────────

pub struct ProviderRegistry {
    /// Registration order, used for listing.
    order: Vec<String>,
    adapters: HashMap<String, Arc<dyn EmailProvider>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.order)
            .finish()
    }
}

impl ProviderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The production set: Gemini and OpenAI, configured from `config` with
    /// credentials read from the environment.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, reqwest::Error> {
        let gemini = GeminiProvider::new(&config.gemini)?;
        let openai = OpenAiProvider::new(&config.openai)?;
        debug!(?gemini, ?openai, "Provider registry initialised");

        Ok(Self::builder()
            .register(GEMINI, Arc::new(gemini))
            .register(OPENAI, Arc::new(openai))
            .build())
    }

    /// Look up an adapter by name, ignoring case and surrounding whitespace.
    ///
    /// Succeeds for registered adapters whose credential is missing;
    /// availability is only reported by [`list_available`](Self::list_available).
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn EmailProvider>, UnknownProvider> {
        self.adapters
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| UnknownProvider(name.to_string()))
    }

    /// Descriptor for every registered adapter, with credential availability
    /// evaluated on each call.
    pub fn list_available(&self) -> Vec<ProviderDescriptor> {
        self.order
            .iter()
            .filter_map(|key| self.adapters.get(key))
            .map(|provider| provider.descriptor())
            .collect()
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
