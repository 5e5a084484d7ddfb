//! Rasterizer — draws a [`LayoutResult`] onto a pixel buffer.
//!
//! Mechanical consumer of the layout contract: black background, white
//! left-aligned lines stepping by `line_height` from the top margin, and a
//! one-pixel border rectangle so downstream de-letterboxing cannot crop the
//! image below its minimum size.

use std::io::Cursor;
use std::path::Path;

use ab_glyph::{FontArc, PxScaleFont, ScaleFont};
use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::errors::AppError;
use crate::layout::LayoutResult;
use crate::typeface::Typeface;

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const FOREGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BORDER: Rgb<u8> = Rgb([128, 192, 64]);

/// Left/top inset for the text block, matching the layout engine's margin.
const MARGIN: u32 = crate::layout::engine::MARGIN;

/// Renders the laid-out lines into an image of exactly
/// `image_width × image_height`.
pub fn render_title_card(layout: &LayoutResult, face: &Typeface) -> RgbImage {
    let mut img = RgbImage::from_pixel(layout.image_width, layout.image_height, BACKGROUND);

    let scaled = face.scaled(layout.font_size);
    let ascent = scaled.ascent();

    let mut y = MARGIN;
    for line in &layout.lines {
        draw_line(&mut img, &scaled, line, MARGIN as f32, y as f32 + ascent);
        y += layout.line_height;
    }

    draw_border(&mut img);

    debug!(
        width = layout.image_width,
        height = layout.image_height,
        lines = layout.lines.len(),
        font_size = layout.font_size,
        "rendered title card"
    );
    img
}

/// Draws one line of glyphs starting at `x`, on the given baseline.
fn draw_line(img: &mut RgbImage, scaled: &PxScaleFont<&FontArc>, text: &str, x: f32, baseline: f32) {
    let mut caret = x;
    let mut prev = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scaled.scale(), ab_glyph::point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue; // whitespace and glyphless codepoints
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i32 + gx as i32;
            let py = bounds.min.y as i32 + gy as i32;
            if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                return;
            }
            let level = (coverage.clamp(0.0, 1.0) * 255.0) as u8;
            let pixel = img.get_pixel_mut(px as u32, py as u32);
            // Antialiased white on black: keep the brighter sample.
            for channel in pixel.0.iter_mut() {
                *channel = (*channel).max(level);
            }
        });
    }
}

/// One-pixel border rectangle around the full image bounds.
fn draw_border(img: &mut RgbImage) {
    let (w, h) = img.dimensions();
    for x in 0..w {
        img.put_pixel(x, 0, BORDER);
        img.put_pixel(x, h - 1, BORDER);
    }
    for y in 0..h {
        img.put_pixel(0, y, BORDER);
        img.put_pixel(w - 1, y, BORDER);
    }
}

/// Encodes the image as PNG into an in-memory buffer (for base64 payloads).
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Writes the image to `path` as PNG regardless of extension.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<(), AppError> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
