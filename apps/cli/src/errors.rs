use thiserror::Error;

use crate::reve_client::ReveError;

/// Application-level error type.
///
/// Every variant is a terminal failure at the process boundary: `main` prints
/// it and exits non-zero. A content-policy flag from the generation service is
/// deliberately NOT an error — commands surface it as a warning.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("image generation failed: {0}")]
    Reve(#[from] ReveError),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
