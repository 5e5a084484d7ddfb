mod commands;
mod config;
mod errors;
mod layout;
mod render;
mod reve_client;
mod typeface;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::generate::GenerateArgs;
use crate::commands::poster::PosterArgs;
use crate::commands::render::RenderArgs;
use crate::config::Config;

/// Titlecard CLI
///
/// Renders fixed-format title-card images and composes movie posters through
/// the Reve generation API.
#[derive(Debug, Parser)]
#[clap(author, version, bin_name = "titlecard")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Render text into a PNG title card (offline).
    Render(RenderArgs),

    /// Generate an image from a text prompt.
    Generate(GenerateArgs),

    /// Compose a movie poster from a base image and a rendered title.
    Poster(PosterArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; credentials are checked per command.
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting titlecard v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => commands::render::run(args)?,
        Command::Generate(args) => commands::generate::run(args, &config).await?,
        Command::Poster(args) => commands::poster::run(args, &config).await?,
    }

    Ok(())
}
