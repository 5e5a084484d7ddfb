// Command handlers — thin wrappers wiring config, layout, renderer, and the
// Reve client together. No algorithmic content lives here.

pub mod generate;
pub mod poster;
pub mod render;

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::reve_client::{GeneratedImage, ReveClient};

/// Builds the Reve client, failing with a configuration error when the API
/// key is absent.
fn reve_client(config: &Config) -> Result<ReveClient, AppError> {
    let key = config.require_api_key()?.to_string();
    Ok(match &config.reve_api_base_url {
        Some(base) => ReveClient::with_base_url(key, base.clone()),
        None => ReveClient::new(key),
    })
}

/// Reports generation telemetry and writes the decoded image to `output`.
///
/// A content-policy flag or an absent image payload is surfaced as a warning,
/// not an error — the request itself succeeded.
fn save_generated(generated: GeneratedImage, output: &Path) -> Result<(), AppError> {
    info!(
        request_id = %generated.request_id,
        credits_used = generated.credits_used,
        credits_remaining = generated.credits_remaining,
        "generation complete"
    );

    if generated.content_violation {
        warn!("content policy violation detected; no image saved");
        return Ok(());
    }

    match generated.image {
        Some(bytes) => {
            std::fs::write(output, bytes)?;
            println!("{}", output.display());
            Ok(())
        }
        None => {
            warn!("no image data in response");
            Ok(())
        }
    }
}
