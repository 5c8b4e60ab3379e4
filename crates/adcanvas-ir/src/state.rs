use std::sync::Arc;

use adcanvas_core::{Color, FrameBuffer};

use crate::template::TemplateModel;

/// Background the editor starts with before the user picks a swatch.
pub const DEFAULT_BACKGROUND: Color = Color {
    r: 3.0 / 255.0,
    g: 105.0 / 255.0,
    b: 161.0 / 255.0,
    a: 1.0,
};

/// User-editable inputs of a single render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub background_color: Color,
    /// Live caption. Starts as the template caption and may diverge from it.
    pub caption_text: String,
    /// Mirrors `template.cta.text`; the session setter writes both.
    pub cta_text: String,
    /// Decoded user photo, if one was uploaded.
    pub uploaded_image: Option<Arc<FrameBuffer>>,
}

impl RenderState {
    /// Initial state for a freshly opened template.
    pub fn from_template(template: &TemplateModel) -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND,
            caption_text: template.caption.text.clone(),
            cta_text: template.cta.text.clone(),
            uploaded_image: None,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_caption(mut self, text: impl Into<String>) -> Self {
        self.caption_text = text.into();
        self
    }

    pub fn with_uploaded_image(mut self, image: Arc<FrameBuffer>) -> Self {
        self.uploaded_image = Some(image);
        self
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::from_template(&TemplateModel::default())
    }
}
