//! Shared CLI helpers: wiring config into the registry and catalog.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use mailcraft_core::config::Config;
use mailcraft_core::utils::{expand_home, get_catalog_path};
use mailcraft_core::FieldError;
use mailcraft_providers::{EmailGenerator, ProviderRegistry};

/// Catalog snapshot path from config, falling back to `~/.mailcraft/catalog.json`.
pub fn catalog_path(config: &Config) -> PathBuf {
    config
        .catalog
        .path
        .as_deref()
        .map(expand_home)
        .unwrap_or_else(get_catalog_path)
}

/// Build the generation facade over the production registry.
pub fn build_generator(config: &Config) -> Result<EmailGenerator> {
    let registry = ProviderRegistry::from_config(&config.providers)
        .context("failed to initialise provider HTTP clients")?;
    Ok(EmailGenerator::new(Arc::new(registry)))
}

/// Print request validation failures to stderr.
pub fn print_field_errors(errors: &[FieldError]) {
    eprintln!("{}", "Invalid request:".red().bold());
    for err in errors {
        eprintln!("  {} {}", format!("{}:", err.field).bold(), err.message);
    }
}
