//! `poster` — compose a movie poster by remixing a base image with a rendered
//! title card.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::layout::{fit_layout, LayoutConfig};
use crate::render::{encode_png, render_title_card, save_png};
use crate::typeface::Typeface;

#[derive(Debug, Args)]
pub struct PosterArgs {
    /// Title text to add to the cover.
    #[clap(long)]
    pub title: String,

    /// Path to the input image (e.g. image.png).
    #[clap(long)]
    pub image: PathBuf,

    /// Output filename for the generated poster (e.g. poster.png).
    #[clap(long)]
    pub output: PathBuf,

    /// Optional: save the intermediate title image to this filename.
    #[clap(long = "text-output")]
    pub text_output: Option<PathBuf>,
}

pub async fn run(args: PosterArgs, config: &Config) -> Result<(), AppError> {
    let client = super::reve_client(config)?;

    info!(title = %args.title, "rendering title image");
    let face = Typeface::load()?;
    let layout = fit_layout(&args.title, &face, &LayoutConfig::default());
    let title_img = render_title_card(&layout, &face);

    if let Some(path) = &args.text_output {
        save_png(&title_img, path)?;
        info!(path = %path.display(), "title image saved");
    }

    let base_image = std::fs::read(&args.image)?;
    let reference_images = vec![
        BASE64.encode(&base_image),
        BASE64.encode(encode_png(&title_img)?),
    ];

    info!("sending remix request to Reve API");
    let generated = client
        .remix_image(&poster_prompt(&args.title), &reference_images)
        .await?;

    super::save_generated(generated, &args.output)
}

/// The remix prompt: `<img>1</img>` is the base image, `<img>2</img>` the
/// rendered title.
fn poster_prompt(title: &str) -> String {
    format!(
        "Create a movie poster by preserving the subject, scenery, style, and subject of \
         <img>1</img> but add the title \"{title}\" as illustrated in <img>2</img>, \
         changed to an appropriate font."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_prompt_embeds_title_and_references() {
        let prompt = poster_prompt("Blade Walker");
        assert!(prompt.contains("\"Blade Walker\""));
        assert!(prompt.contains("<img>1</img>"));
        assert!(prompt.contains("<img>2</img>"));
    }
}
