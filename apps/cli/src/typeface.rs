//! The fixed typeface asset backing all text measurement and rasterization.
//!
//! One font, loadable at arbitrary pixel sizes. Scaling an `ab_glyph` font is a
//! cheap pure computation, so measurers are derived per call instead of cached
//! per size. Font selection beyond the single asset (plus an env override for
//! deployments that keep it elsewhere) is out of scope.

use ab_glyph::{Font, FontArc, PxScale, PxScaleFont, ScaleFont};

use crate::errors::AppError;
use crate::layout::{TextMeasurer, VMetrics};

/// Environment variable overriding the font asset path.
pub const FONT_PATH_ENV: &str = "TITLECARD_FONT";

/// Default asset location, relative to the crate root.
const DEFAULT_FONT_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/NotoSans-SemiBold.ttf"
);

/// The single fixed typeface. Immutable once loaded; cheap to scale.
#[derive(Clone)]
pub struct Typeface {
    font: FontArc,
}

impl Typeface {
    /// Loads the font asset from `TITLECARD_FONT` if set, else the bundled
    /// default path.
    pub fn load() -> Result<Self, AppError> {
        let path =
            std::env::var(FONT_PATH_ENV).unwrap_or_else(|_| DEFAULT_FONT_PATH.to_string());
        let bytes = std::fs::read(&path)
            .map_err(|e| AppError::Font(format!("failed to read font asset '{path}': {e}")))?;
        Self::from_bytes(bytes)
    }

    /// Parses a typeface from raw font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AppError> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| AppError::Font(format!("failed to parse font asset: {e}")))?;
        Ok(Self { font })
    }

    /// The font scaled to `size_px`, for glyph outlining in the renderer.
    pub fn scaled(&self, size_px: u32) -> PxScaleFont<&FontArc> {
        self.font.as_scaled(PxScale::from(size_px.max(1) as f32))
    }
}

impl TextMeasurer for Typeface {
    /// Kern-adjusted sum of horizontal advances.
    fn line_width(&self, text: &str, size_px: u32) -> f32 {
        let scaled = self.scaled(size_px);
        let mut width = 0.0_f32;
        let mut prev = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    fn v_metrics(&self, size_px: u32) -> VMetrics {
        let scaled = self.scaled(size_px);
        VMetrics {
            ascent: scaled.ascent(),
            // ab_glyph reports descent as a negative offset from the baseline.
            descent: -scaled.descent(),
        }
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = Typeface::from_bytes(vec![0u8; 64]);
        assert!(matches!(result, Err(AppError::Font(_))));
    }

    #[test]
    fn test_measurement_properties_with_real_font() {
        // Only runs when the font asset (or an override) is present.
        let Ok(face) = Typeface::load() else {
            return;
        };
        let m = face.v_metrics(48);
        assert!(m.ascent > 0.0, "ascent must be positive");
        assert!(m.descent > 0.0, "descent is reported as a positive distance");

        let short = face.line_width("Hi", 48);
        let long = face.line_width("Hello World", 48);
        assert!(long > short, "longer text must measure wider");
        assert_eq!(face.line_width("", 48), 0.0);

        // Width scales with font size.
        assert!(face.line_width("Hello", 48) > face.line_width("Hello", 24));
    }
}
