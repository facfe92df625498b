//! Mailcraft CLI: entry point.
//!
//! # Commands
//!
//! - `mailcraft serve [--host H] [--port P] [--logs]`: start the HTTP API
//! - `mailcraft status`: show configuration and provider availability
//! - `mailcraft generate ...`: generate one email and print it as JSON

mod generate;
mod helpers;
mod serve;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ✉️ Mailcraft: persuasive marketing emails from AI providers
#[derive(Parser)]
#[command(name = "mailcraft", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Generate one email and print it as JSON
    Generate(generate::GenerateArgs),
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs);
            serve::run(host, port).await
        }
        Commands::Status => status::run(),
        Commands::Generate(args) => {
            init_logging(args.logs);
            generate::run(args).await
        }
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("mailcraft=debug,info")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["mailcraft", "serve", "--port", "8080", "--logs"]).unwrap();
        match cli.command {
            Commands::Serve { host, port, logs } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
                assert!(logs);
            }
            _ => panic!("expected serve"),
        }
    }
}
