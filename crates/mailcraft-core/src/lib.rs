//! Core types, configuration, style tables and the reference-data catalog
//! shared by every Mailcraft crate.

pub mod catalog;
pub mod config;
pub mod styles;
pub mod types;
pub mod utils;

pub use types::{FieldError, GenerationRequest, GenerationResponse, ProviderDescriptor};
