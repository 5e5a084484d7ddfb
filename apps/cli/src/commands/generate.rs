//! `generate` — text prompt → image via the Reve create endpoint.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Text prompt for image generation.
    #[clap(long)]
    pub prompt: String,

    /// Output filename (e.g. output.png).
    #[clap(long)]
    pub output: PathBuf,
}

pub async fn run(args: GenerateArgs, config: &Config) -> Result<(), AppError> {
    let client = super::reve_client(config)?;

    info!(prompt = %args.prompt, aspect_ratio = "2:3", "generating image");
    let generated = client.create_image(&args.prompt).await?;

    super::save_generated(generated, &args.output)
}
