//! Text rendering module.
//! Uses fontdue for CPU-based glyph rasterization of the creative's single
//! font family.

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use adcanvas_core::{CanvasError, CanvasResult, Color, FrameBuffer, TextAlign};

/// Fonts tried, in order, when no font path is configured.
/// Liberation Sans is metric-compatible with Arial.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/TTF/arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

/// Measures and fills single lines of text on a frame buffer.
///
/// `fill_text` places the alphabetic baseline at `y`; `align` picks which
/// side of the run sits at `x`.
pub trait TextPainter: Send + Sync {
    /// Advance width of `text` in pixels at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> f32;

    fn fill_text(
        &self,
        fb: &mut FrameBuffer,
        text: &str,
        font_size: f32,
        color: &Color,
        x: f32,
        y: f32,
        align: TextAlign,
    );
}

/// Text painter backed by one fontdue font.
pub struct FontTextPainter {
    font: Font,
    source: String,
}

impl FontTextPainter {
    /// Parse a font from raw TrueType/OpenType bytes.
    pub fn from_bytes(data: Vec<u8>, source: impl Into<String>) -> CanvasResult<Self> {
        let source = source.into();
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| CanvasError::Font(format!("failed to parse font {}: {}", source, e)))?;
        Ok(Self { font, source })
    }

    /// Load a font from a file path.
    pub fn from_file(path: &Path) -> CanvasResult<Self> {
        let data = std::fs::read(path).map_err(|e| {
            CanvasError::Font(format!("failed to read font file {}: {}", path.display(), e))
        })?;
        Self::from_bytes(data, path.display().to_string())
    }

    /// Use `configured` when given, otherwise the first installed system candidate.
    pub fn discover(configured: Option<&Path>) -> CanvasResult<Self> {
        if let Some(path) = configured {
            return Self::from_file(path);
        }
        let found = SYSTEM_FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .ok_or_else(|| {
                CanvasError::Font(
                    "no usable system font found; set render.font_path in adcanvas.toml".into(),
                )
            })?;
        tracing::info!("using font {}", found.display());
        Self::from_file(&found)
    }

    fn kern(&self, prev: Option<char>, ch: char, font_size: f32) -> f32 {
        prev.and_then(|p| self.font.horizontal_kern(p, ch, font_size))
            .unwrap_or(0.0)
    }
}

impl TextPainter for FontTextPainter {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            width += self.kern(prev, ch, font_size);
            width += self.font.metrics(ch, font_size).advance_width;
            prev = Some(ch);
        }
        width
    }

    fn fill_text(
        &self,
        fb: &mut FrameBuffer,
        text: &str,
        font_size: f32,
        color: &Color,
        x: f32,
        y: f32,
        align: TextAlign,
    ) {
        let [r, g, b, a] = color.to_rgba8();
        let mut cursor_x = align.start_x(x, self.measure(text, font_size));
        let mut prev = None;

        for ch in text.chars() {
            cursor_x += self.kern(prev, ch, font_size);
            let (metrics, bitmap) = self.font.rasterize(ch, font_size);
            let glyph_x = cursor_x.round() as i64 + metrics.xmin as i64;
            let glyph_y = y.round() as i64 - (metrics.height as i64 + metrics.ymin as i64);

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx] as u32;
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (coverage * a as u32 + 127) / 255;
                    fb.blend_pixel(
                        glyph_x + gx as i64,
                        glyph_y + gy as i64,
                        [r, g, b, alpha as u8],
                    );
                }
            }

            cursor_x += metrics.advance_width;
            prev = Some(ch);
        }
    }
}

impl std::fmt::Debug for FontTextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontTextPainter")
            .field("source", &self.source)
            .finish()
    }
}
