//! Email generation for Mailcraft: prompt construction, AI provider
//! adapters, the provider registry and the generation facade.

pub mod error;
pub mod gemini;
pub mod generator;
mod http;
pub mod openai;
pub mod prompt;
pub mod registry;
pub mod reply;
pub mod traits;

pub use error::{GenerationError, PromptError, ProviderError, UnknownProvider, UpstreamError};
pub use gemini::GeminiProvider;
pub use generator::EmailGenerator;
pub use openai::OpenAiProvider;
pub use prompt::{build_prompt, EmailPrompt};
pub use registry::{ProviderRegistry, RegistryBuilder};
pub use traits::EmailProvider;
