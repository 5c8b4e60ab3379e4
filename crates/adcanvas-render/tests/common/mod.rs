//! Shared fixtures: an in-memory asset source and a font-free text painter.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{Notify, Semaphore};

use adcanvas_core::{BoxError, Color, FrameBuffer, Position, Rect, TextAlign};
use adcanvas_ir::{AssetUrls, CaptionStyle, CtaStyle, TemplateModel};
use adcanvas_render::image_loader::encode_png;
use adcanvas_render::{AssetCache, AssetLoader, CompositingPipeline, TextPainter};

pub const SIZE: u32 = 200;

pub const PATTERN_URL: &str = "memory://pattern.png";
pub const SLOW_PATTERN_URL: &str = "memory://slow-pattern.png";
pub const MASK_URL: &str = "memory://mask.png";
pub const MISSING_URL: &str = "memory://missing.png";

pub const MASK_RECT: Rect = Rect {
    x: 100,
    y: 100,
    width: 40,
    height: 40,
};

pub fn green() -> Color {
    Color::from_rgb8(0, 200, 0)
}

pub fn yellow() -> Color {
    Color::from_rgb8(250, 204, 21)
}

pub fn red() -> Color {
    Color::from_rgb8(220, 20, 20)
}

/// Serves PNG bytes from memory, counting fetches per URL.
///
/// A fetch of the URL registered with [`MemorySource::with_slow`] signals
/// [`MemorySource::wait_started`] and then blocks until [`MemorySource::release`].
pub struct MemorySource {
    assets: HashMap<String, Vec<u8>>,
    fetches: Mutex<HashMap<String, usize>>,
    slow: Option<String>,
    gate: Semaphore,
    started: Notify,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            fetches: Mutex::new(HashMap::new()),
            slow: None,
            gate: Semaphore::new(0),
            started: Notify::new(),
        }
    }

    pub fn with_png(mut self, url: &str, fb: &FrameBuffer) -> Self {
        let bytes = encode_png(fb).expect("encode fixture");
        self.assets.insert(url.to_string(), bytes);
        self
    }

    pub fn with_slow(mut self, url: &str) -> Self {
        self.slow = Some(url.to_string());
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().get(url).copied().unwrap_or(0)
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl adcanvas_render::AssetSource for MemorySource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BoxError> {
        *self.fetches.lock().entry(url.to_string()).or_default() += 1;
        if self.slow.as_deref() == Some(url) {
            self.started.notify_one();
            self.gate.acquire().await?.forget();
        }
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| format!("404 Not Found: {url}").into())
    }
}

/// Paints each visible character as a solid block `font_size` tall standing
/// on the baseline, half as wide as it is tall.
#[derive(Debug, Default)]
pub struct BlockTextPainter;

impl BlockTextPainter {
    fn advance(font_size: f32) -> f32 {
        font_size / 2.0
    }
}

impl TextPainter for BlockTextPainter {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * Self::advance(font_size)
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
        let advance = Self::advance(font_size);
        let start = align.start_x(x, self.measure(text, font_size));
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = (start + i as f32 * advance).round() as i32;
            let top = (y - font_size).round() as i32;
            fb.fill_rect(
                Rect::new(left, top, advance as u32, font_size as u32),
                color,
            );
        }
    }
}

/// 200x200 pattern: transparent except a green 10x10 square in the corner.
pub fn pattern_frame() -> FrameBuffer {
    let mut fb = FrameBuffer::new(SIZE, SIZE);
    fb.fill_rect(Rect::new(0, 0, 10, 10), &green());
    fb
}

/// Mask artwork sized to [`MASK_RECT`]: opaque white left half, transparent right half.
pub fn mask_frame() -> FrameBuffer {
    let mut fb = FrameBuffer::new(MASK_RECT.width, MASK_RECT.height);
    fb.fill_rect(
        Rect::new(0, 0, MASK_RECT.width / 2, MASK_RECT.height),
        &Color::WHITE,
    );
    fb
}

pub fn standard_source() -> MemorySource {
    MemorySource::new()
        .with_png(PATTERN_URL, &pattern_frame())
        .with_png(SLOW_PATTERN_URL, &pattern_frame())
        .with_png(MASK_URL, &mask_frame())
}

/// A small template whose layers do not overlap on a 200x200 surface.
pub fn test_template() -> TemplateModel {
    TemplateModel {
        caption: CaptionStyle {
            text: "Hello world".to_string(),
            position: Position::new(10, 40),
            font_size: 10,
            alignment: TextAlign::Left,
            text_color: Color::WHITE,
            max_characters_per_line: 10,
        },
        cta: CtaStyle {
            text: "Go".to_string(),
            position: Position::new(10, 60),
            font_size: 10,
            text_color: Color::BLACK,
            background_color: yellow(),
            padding: "2vw".to_string(),
        },
        image_mask: MASK_RECT,
        urls: AssetUrls {
            mask: MASK_URL.to_string(),
            stroke: "memory://stroke.png".to_string(),
            design_pattern: PATTERN_URL.to_string(),
        },
    }
}

pub fn pipeline_over(source: Arc<MemorySource>) -> CompositingPipeline {
    CompositingPipeline::new(
        AssetCache::new(AssetLoader::new(source)),
        Arc::new(BlockTextPainter),
    )
}

pub fn pixel(fb: &FrameBuffer, x: u32, y: u32) -> [u8; 4] {
    fb.get_pixel(x, y).expect("pixel in bounds")
}
