//! `mailcraft generate`: one generation through the facade, printed as JSON.

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use mailcraft_core::config::load_config;
use mailcraft_core::GenerationRequest;

use crate::helpers;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Email type key (promotional, welcome, cart-abandonment, ...)
    #[arg(long)]
    pub email_type: String,

    /// Tone of the message
    #[arg(long)]
    pub tone: String,

    /// Product name
    #[arg(long)]
    pub product: String,

    /// Product description
    #[arg(long)]
    pub description: String,

    /// Product link used in the call to action
    #[arg(long)]
    pub link: String,

    /// Target audience
    #[arg(long)]
    pub audience: String,

    /// Copywriter persona key, or "general"
    #[arg(long)]
    pub copywriter: Option<String>,

    /// Elements the email must avoid
    #[arg(long)]
    pub avoid: Option<String>,

    /// Include a preheader line
    #[arg(long, default_value_t = false)]
    pub preheader: bool,

    /// Provider key (defaults to generation.defaultProvider)
    #[arg(long)]
    pub provider: Option<String>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub logs: bool,
}

impl GenerateArgs {
    fn into_request(self) -> GenerationRequest {
        GenerationRequest {
            email_type: self.email_type,
            client_tone: self.tone,
            product_name: self.product,
            product_description: self.description,
            product_link: self.link,
            target_audience: self.audience,
            copywriter_profile: self.copywriter,
            elements_to_avoid: self.avoid,
            include_preheader: self.preheader,
            provider_name: self.provider,
        }
    }
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let config = load_config(None);
    let request = args.into_request();

    if let Err(errors) = request.validate() {
        helpers::print_field_errors(&errors);
        bail!("{} invalid field(s)", errors.len());
    }

    let generator = helpers::build_generator(&config)?;
    let provider = request.provider_or(&config.generation.default_provider);
    info!(provider, "Generating email");

    let response = generator.generate_email(&request, provider).await?;
    let json = serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{json}");
    Ok(())
}
