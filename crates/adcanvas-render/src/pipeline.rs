use std::sync::Arc;

use adcanvas_core::{AdcanvasConfig, CanvasResult, FrameBuffer};
use adcanvas_ir::{RenderState, TemplateModel};

use crate::assets::{AssetCache, AssetLoader, DefaultSource};
use crate::image_loader::resize_exact;
use crate::layout::{CaptionLayout, CtaLayout};
use crate::text::{FontTextPainter, TextPainter};

/// What one render pass laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Caption lines in draw order.
    pub caption_lines: Vec<String>,
    pub line_height: i32,
    pub cta: CtaLayout,
    /// Whether an uploaded photo was composited through the mask.
    pub photo_composited: bool,
}

/// The compositing pipeline: template + state in, one finished frame out.
///
/// Layers are drawn in a fixed order (clear, background, design pattern,
/// mask, photo through mask, caption, CTA); each later layer paints over the
/// earlier ones.
pub struct CompositingPipeline {
    assets: AssetCache,
    text: Arc<dyn TextPainter>,
}

impl CompositingPipeline {
    pub fn new(assets: AssetCache, text: Arc<dyn TextPainter>) -> Self {
        Self { assets, text }
    }

    /// Build a pipeline with the default asset transports and the configured font.
    pub fn from_config(config: &AdcanvasConfig) -> CanvasResult<Self> {
        let source = DefaultSource::new(&config.assets)?;
        let assets = AssetCache::from_config(AssetLoader::new(Arc::new(source)), &config.assets);
        let text = FontTextPainter::discover(config.render.font_path.as_deref())?;
        Ok(Self::new(assets, Arc::new(text)))
    }

    /// Draw one complete frame into `surface`.
    ///
    /// If an asset fails to load the pass stops there and the error is
    /// returned; `surface` keeps whatever the finished steps drew.
    pub async fn render_into(
        &self,
        surface: &mut FrameBuffer,
        state: &RenderState,
        template: &TemplateModel,
    ) -> CanvasResult<RenderReport> {
        let (width, height) = (surface.width, surface.height);
        let mask_rect = template.image_mask;

        tracing::debug!("clear + background {}", state.background_color);
        surface.clear();
        surface.fill(&state.background_color);

        let pattern = self.assets.get(&template.urls.design_pattern).await?;
        surface.composite_over(&resize_exact(&pattern, width, height), 0, 0);
        tracing::debug!("design pattern drawn");

        let mask = self.assets.get(&template.urls.mask).await?;
        let mut photo_composited = false;
        if mask_rect.is_empty() {
            tracing::debug!("image mask has zero area, skipping mask and photo");
        } else {
            let mask = resize_exact(&mask, mask_rect.width, mask_rect.height);
            surface.composite_over(&mask, mask_rect.x, mask_rect.y);
            tracing::debug!("mask drawn at {:?}", mask_rect);

            if let Some(photo) = &state.uploaded_image {
                // The mask artwork is the stencil: photo alpha times mask alpha.
                let mut photo = resize_exact(photo, mask_rect.width, mask_rect.height);
                photo.apply_mask(&mask, 0, 0);
                surface.composite_over(&photo, mask_rect.x, mask_rect.y);
                photo_composited = true;
                tracing::debug!("photo composited through mask");
            }
        }

        let caption = &template.caption;
        let caption_layout = CaptionLayout::compute(caption, &state.caption_text);
        let caption_size = caption.font_size as f32;
        for (line, baseline) in caption_layout.lines.iter().zip(&caption_layout.baselines) {
            self.text.fill_text(
                surface,
                line,
                caption_size,
                &caption.text_color,
                baseline.x as f32,
                baseline.y as f32,
                caption.alignment,
            );
        }
        tracing::debug!("caption drawn in {} lines", caption_layout.line_count());

        let cta = &template.cta;
        let cta_size = cta.font_size as f32;
        let label_width = self.text.measure(&cta.text, cta_size);
        let cta_layout = CtaLayout::compute(
            cta,
            caption_layout.line_count(),
            caption_layout.line_height,
            label_width,
        );
        surface.fill_rect(cta_layout.rect, &cta.background_color);
        // The caption's alignment is still in effect for the label.
        self.text.fill_text(
            surface,
            &cta.text,
            cta_size,
            &cta.text_color,
            cta_layout.label_origin.x as f32,
            cta_layout.label_origin.y as f32,
            caption.alignment,
        );
        tracing::debug!("cta drawn at {:?}", cta_layout.rect);

        Ok(RenderReport {
            caption_lines: caption_layout.lines,
            line_height: caption_layout.line_height,
            cta: cta_layout,
            photo_composited,
        })
    }
}

impl std::fmt::Debug for CompositingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositingPipeline")
            .field("assets", &self.assets)
            .finish_non_exhaustive()
    }
}
