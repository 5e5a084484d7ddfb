//! `render` — deterministic text → PNG title card. Needs no credentials.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::errors::AppError;
use crate::layout::{fit_layout, LayoutConfig};
use crate::render::{render_title_card, save_png};
use crate::typeface::Typeface;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Text to render; read from standard input when omitted.
    pub text: Option<String>,

    /// Output PNG path.
    #[clap(short = 'o', long = "out", default_value = "out.png")]
    pub out: PathBuf,
}

pub fn run(args: RenderArgs) -> Result<(), AppError> {
    let text = resolve_text(args.text)?;

    let face = Typeface::load()?;
    let layout = fit_layout(&text, &face, &LayoutConfig::default());
    info!(
        font_size = layout.font_size,
        lines = layout.lines.len(),
        width = layout.image_width,
        height = layout.image_height,
        "laid out title card"
    );

    let img = render_title_card(&layout, &face);
    save_png(&img, &args.out)?;
    println!("{}", args.out.display());
    Ok(())
}

/// Uses the positional text when given, else reads all of standard input with
/// trailing newlines stripped.
fn resolve_text(arg: Option<String>) -> Result<String, AppError> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(trim_trailing_newlines(&buf).to_string())
        }
    }
}

/// Strips trailing `\n` characters only — interior newlines stay literal.
fn trim_trailing_newlines(s: &str) -> &str {
    s.trim_end_matches('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_newlines_strips_all_trailing() {
        assert_eq!(trim_trailing_newlines("hello\n"), "hello");
        assert_eq!(trim_trailing_newlines("hello\n\n\n"), "hello");
    }

    #[test]
    fn test_trim_trailing_newlines_keeps_interior() {
        assert_eq!(trim_trailing_newlines("a\nb\n"), "a\nb");
    }

    #[test]
    fn test_trim_trailing_newlines_no_newline() {
        assert_eq!(trim_trailing_newlines("hello"), "hello");
        assert_eq!(trim_trailing_newlines(""), "");
    }
}
