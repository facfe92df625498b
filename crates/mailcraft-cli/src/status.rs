//! `mailcraft status`: show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use mailcraft_core::config::{get_config_path, load_config};
use mailcraft_core::styles::{EMAIL_TYPES, PERSONAS};

use crate::helpers;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "✉️  Mailcraft Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(defaults)".dimmed().to_string()
        }
    );

    let catalog_path = helpers::catalog_path(&config);
    println!(
        "  {:<18} {} {}",
        "Catalog:".bold(),
        catalog_path.display(),
        if catalog_path.exists() {
            "✓".green().to_string()
        } else {
            "(empty)".dimmed().to_string()
        }
    );

    println!(
        "  {:<18} {}:{}",
        "Server:".bold(),
        config.server.host,
        config.server.port
    );
    println!(
        "  {:<18} {}",
        "Default provider:".bold(),
        config.generation.default_provider
    );

    println!();
    println!("  {}", "Providers:".bold());

    let generator = helpers::build_generator(&config)?;
    let registry = generator.registry();
    for (key, descriptor) in registry.keys().zip(registry.list_available()) {
        let status = if descriptor.available {
            format!("{} ({} set)", "✓".green(), descriptor.key)
        } else {
            format!("{}", format!("· {} not set", descriptor.key).dimmed())
        };
        let model = config
            .providers
            .get_by_name(key)
            .and_then(|p| p.model.as_deref())
            .unwrap_or("default model");
        println!(
            "    {:<16} {} {}",
            descriptor.name,
            status,
            format!("[{model}]").dimmed()
        );
    }

    println!();
    println!("  {}", "Email types:".bold());
    for spec in EMAIL_TYPES {
        println!("    {:<16} {}", spec.key, spec.label.dimmed());
    }

    println!();
    println!("  {}", "Personas:".bold());
    for spec in PERSONAS {
        println!("    {:<16} {}", spec.key, spec.display_name.dimmed());
    }

    println!();
    Ok(())
}
