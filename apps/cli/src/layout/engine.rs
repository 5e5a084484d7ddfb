//! Adaptive fit loop, overflow truncation, and dimension finalization.
//!
//! # Fitting pipeline
//! 1. Wrap at the current font size and measure block height.
//! 2. If the image is too tall, step the font size down by 2 and retry,
//!    stopping at the minimum size.
//! 3. If the minimum size still overflows, truncate the line list and mark the
//!    cut with an ellipsis fitted to the available width.
//! 4. Clamp image dimensions into the output contract's bounds.
//!
//! The whole pipeline is a pure function of `(text, measurer, config)` —
//! no state survives between invocations.

use serde::Serialize;

use crate::layout::measure::TextMeasurer;
use crate::layout::wrap::wrap_single_line;

/// Truncation glyph appended to the last retained line when content is cut.
pub const ELLIPSIS: char = '\u{2026}';

pub const MAX_W: u32 = 720;
pub const MAX_H: u32 = 1280;
pub const MIN_IMG_W: u32 = 640;
pub const MIN_IMG_H: u32 = 320;
pub const DEFAULT_FONT_SIZE: u32 = 48;
/// Vision models do poorly below this size.
pub const MIN_FONT_SIZE: u32 = 24;
pub const MARGIN: u32 = 15;
/// Fraction of the font size added to each line's height.
pub const LINE_SPACING_FACTOR: f32 = 0.18;
pub const FONT_SIZE_STEP: u32 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout bounds and fitting parameters.
///
/// `Default` is the fixed output contract; tests construct tighter configs to
/// exercise the fit loop. Immutable after construction.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub max_w: u32,
    pub max_h: u32,
    pub min_img_w: u32,
    pub min_img_h: u32,
    pub default_font_size: u32,
    pub min_font_size: u32,
    pub margin: u32,
    pub line_spacing_factor: f32,
    pub font_size_step: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_w: MAX_W,
            max_h: MAX_H,
            min_img_w: MIN_IMG_W,
            min_img_h: MIN_IMG_H,
            default_font_size: DEFAULT_FONT_SIZE,
            min_font_size: MIN_FONT_SIZE,
            margin: MARGIN,
            line_spacing_factor: LINE_SPACING_FACTOR,
            font_size_step: FONT_SIZE_STEP,
        }
    }
}

impl LayoutConfig {
    /// Pixel width budget for a line after subtracting both margins.
    pub fn avail_width(&self) -> f32 {
        self.max_w as f32 - 2.0 * self.margin as f32
    }

    /// Vertical pixel advance between successive lines at `font_size`.
    fn line_height<M: TextMeasurer>(&self, measurer: &M, font_size: u32) -> u32 {
        let m = measurer.v_metrics(font_size);
        (m.ascent + m.descent).ceil() as u32
            + (font_size as f32 * self.line_spacing_factor) as u32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result type
// ────────────────────────────────────────────────────────────────────────────

/// Final layout for one invocation: display lines, chosen font size, and the
/// target image geometry the renderer must honor exactly.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    /// Lines in vertical reading order. Always at least one (possibly empty).
    pub lines: Vec<String>,
    pub font_size: u32,
    pub image_width: u32,
    pub image_height: u32,
    pub line_height: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Fitting pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `text` within `config`'s bounds, choosing the largest font size
/// (descending from the default) whose wrapped block fits, then truncating
/// with an ellipsis if even the minimum size overflows.
pub fn fit_layout<M: TextMeasurer>(
    text: &str,
    measurer: &M,
    config: &LayoutConfig,
) -> LayoutResult {
    let avail_w = config.avail_width();

    let mut font_size = config.default_font_size;
    let (mut lines, line_h) = loop {
        let mut lines = wrap_single_line(text, measurer, font_size, avail_w);
        if lines.is_empty() {
            // Empty input still renders as one (blank) line.
            lines.push(String::new());
        }
        let line_h = config.line_height(measurer, font_size);
        let img_h = lines.len() as u32 * line_h + 2 * config.margin;
        if img_h <= config.max_h || font_size <= config.min_font_size {
            break (lines, line_h);
        }
        font_size -= config.font_size_step;
    };

    // Even the minimum size may overflow: cut the tail and mark it.
    let img_h = lines.len() as u32 * line_h + 2 * config.margin;
    if img_h > config.max_h {
        truncate_with_ellipsis(&mut lines, measurer, font_size, avail_w, config, line_h);
    }

    finalize(lines, measurer, font_size, line_h, config)
}

/// Keeps only the lines that fit the height budget and suffixes the last one
/// with an ellipsis, shortening it until the ellipsis fits the line width.
fn truncate_with_ellipsis<M: TextMeasurer>(
    lines: &mut Vec<String>,
    measurer: &M,
    font_size: u32,
    avail_w: f32,
    config: &LayoutConfig,
    line_h: u32,
) {
    let budget = (config.max_h - 2 * config.margin) / line_h.max(1);
    let max_lines = budget.max(1) as usize;
    lines.truncate(max_lines);

    let mut last = lines.pop().unwrap_or_default();
    loop {
        let mut candidate = last.clone();
        candidate.push(ELLIPSIS);
        if measurer.line_width(&candidate, font_size) <= avail_w {
            break;
        }
        if last.pop().is_none() {
            // Exhausted the line: accept an ellipsis-only line.
            break;
        }
    }
    last.push(ELLIPSIS);
    lines.push(last);
}

/// Computes final image dimensions from the settled line list and clamps them
/// into the contract's bounds.
fn finalize<M: TextMeasurer>(
    lines: Vec<String>,
    measurer: &M,
    font_size: u32,
    line_h: u32,
    config: &LayoutConfig,
) -> LayoutResult {
    // An empty line still occupies vertical space; measure it as one space so
    // the width floor stays non-degenerate.
    let max_line_w = lines
        .iter()
        .map(|line| {
            let probe = if line.is_empty() { " " } else { line.as_str() };
            measurer.line_width(probe, font_size)
        })
        .fold(0.0_f32, f32::max);

    let block_h = lines.len() as u32 * line_h;

    let image_width = (max_line_w.ceil() as u32 + 2 * config.margin)
        .min(config.max_w)
        .max(config.min_img_w);
    let image_height = (block_h + 2 * config.margin)
        .min(config.max_h)
        .max(config.min_img_h);

    LayoutResult {
        lines,
        font_size,
        image_width,
        image_height,
        line_height: line_h,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
