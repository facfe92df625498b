//! HTTP API for Mailcraft.
//!
//! An axum server exposing email generation and provider availability,
//! plus CRUD routes for the reference-data catalog.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use mailcraft_core::catalog::CatalogStore;
//! use mailcraft_providers::{EmailGenerator, ProviderRegistry};
//! use mailcraft_web::{build_router, start_server, AppState};
//!
//! let registry = ProviderRegistry::from_config(&config.providers)?;
//! let state = AppState {
//!     generator: EmailGenerator::new(Arc::new(registry)),
//!     catalog: Arc::new(CatalogStore::in_memory()),
//!     default_provider: "gemini".into(),
//! };
//! let addr = start_server(build_router(state), ([127, 0, 0, 1], 5000).into()).await?;
//! println!("API: http://{addr}/api/ai-providers");
//! ```

mod api;
mod catalog;
mod error;
mod server;

pub use api::{AppState, ProvidersResponse};
pub use error::ApiError;
pub use server::{build_router, serve, start_server};
