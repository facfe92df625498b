//! Config loader: reads `~/.mailcraft/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.mailcraft/config.json`
//! 3. Environment variables `MAILCRAFT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `MAILCRAFT_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `MAILCRAFT_SERVER__HOST` → `server.host`
/// - `MAILCRAFT_SERVER__PORT` → `server.port`
/// - `MAILCRAFT_GENERATION__DEFAULT_PROVIDER` → `generation.default_provider`
/// - `MAILCRAFT_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `MAILCRAFT_PROVIDERS__<NAME>__MODEL` → `providers.<name>.model`
/// - `MAILCRAFT_PROVIDERS__<NAME>__TIMEOUT_SECS` → `providers.<name>.timeout_secs`
/// - `MAILCRAFT_CATALOG__PATH` → `catalog.path`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("MAILCRAFT_SERVER__HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("MAILCRAFT_SERVER__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        } else {
            warn!("Ignoring invalid MAILCRAFT_SERVER__PORT={}", val);
        }
    }

    if let Ok(val) = std::env::var("MAILCRAFT_GENERATION__DEFAULT_PROVIDER") {
        if !val.trim().is_empty() {
            config.generation.default_provider = val.trim().to_lowercase();
        }
    }

    apply_provider_env(&mut config.providers.gemini, "GEMINI");
    apply_provider_env(&mut config.providers.openai, "OPENAI");

    if let Ok(val) = std::env::var("MAILCRAFT_CATALOG__PATH") {
        config.catalog.path = Some(val);
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("MAILCRAFT_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if let Ok(val) = std::env::var(format!("MAILCRAFT_PROVIDERS__{name}__MODEL")) {
        provider.model = Some(val);
    }
    if let Ok(val) = std::env::var(format!("MAILCRAFT_PROVIDERS__{name}__TIMEOUT_SECS")) {
        if let Ok(secs) = val.parse::<u64>() {
            provider.timeout_secs = secs;
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
