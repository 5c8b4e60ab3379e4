//! Caption and CTA placement.
//!
//! The CTA button is chained to the caption: it moves down by one line height
//! for every line the caption wraps into.

use adcanvas_core::{Position, Rect};
use adcanvas_ir::{CaptionStyle, CtaStyle};

use crate::wrap::wrap_lines;

/// Fixed leading added to the caption font size.
pub const LINE_LEADING: i32 = 10;
/// Vertical gap between the last caption slot and the CTA button.
pub const CTA_GAP: i32 = 30;
/// Horizontal inset of the CTA label; the button grows by twice this.
pub const CTA_PADDING_X: i32 = 20;
/// Extra button height over the CTA font size.
pub const CTA_EXTRA_HEIGHT: u32 = 20;
/// Offset from the button top to the CTA label baseline.
pub const CTA_BASELINE_OFFSET: i32 = 35;

/// Distance between consecutive caption baselines.
pub fn line_height(font_size: u32) -> i32 {
    i32::try_from(font_size)
        .unwrap_or(i32::MAX)
        .saturating_add(LINE_LEADING)
}

/// `count * step`, clamped to the `i32` range.
fn stride(count: usize, step: i32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(step)
}

/// Wrapped caption with one baseline anchor per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionLayout {
    pub lines: Vec<String>,
    pub line_height: i32,
    pub baselines: Vec<Position>,
}

impl CaptionLayout {
    pub fn compute(style: &CaptionStyle, text: &str) -> Self {
        let lines = wrap_lines(text, style.max_characters_per_line);
        let line_height = line_height(style.font_size);
        let baselines = (0..lines.len())
            .map(|i| style.position.offset(0, stride(i, line_height)))
            .collect();
        Self {
            lines,
            line_height,
            baselines,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// CTA button rectangle and label anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtaLayout {
    pub rect: Rect,
    pub label_origin: Position,
}

impl CtaLayout {
    /// Place the CTA below a caption of `caption_lines` lines.
    ///
    /// Coordinates clamp at the `i32` range, so far off-surface templates
    /// simply draw nothing.
    pub fn compute(
        style: &CtaStyle,
        caption_lines: usize,
        caption_line_height: i32,
        label_width: f32,
    ) -> Self {
        let x = style.position.x;
        let y = style
            .position
            .y
            .saturating_add(stride(caption_lines, caption_line_height))
            .saturating_add(CTA_GAP);
        let width = (label_width + 2.0 * CTA_PADDING_X as f32).round().max(0.0) as u32;
        Self {
            rect: Rect::new(
                x,
                y,
                width,
                style.font_size.saturating_add(CTA_EXTRA_HEIGHT),
            ),
            label_origin: Position::new(x, y).offset(CTA_PADDING_X, CTA_BASELINE_OFFSET),
        }
    }
}
