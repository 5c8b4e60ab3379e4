use serde::{Deserialize, Serialize};

use adcanvas_core::{CanvasResult, Color, Position, Rect, TextAlign};

/// Caption block: the wrapped headline text of the creative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionStyle {
    /// Nominal caption. Seeds the live caption text; not kept in sync with it.
    pub text: String,
    /// Anchor of the first line's baseline.
    pub position: Position,
    /// Font size in pixels.
    pub font_size: u32,
    pub alignment: TextAlign,
    pub text_color: Color,
    /// Greedy wrap limit, counted in characters.
    pub max_characters_per_line: usize,
}

/// Call-to-action button placed below the caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaStyle {
    pub text: String,
    /// Button origin before the caption-height shift is added.
    pub position: Position,
    pub font_size: u32,
    pub text_color: Color,
    pub background_color: Color,
    /// CSS-like dimension string. Carried for template authors, not used by layout.
    pub padding: String,
}

/// References to the layered template artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUrls {
    /// Stencil artwork drawn into the image mask rectangle.
    pub mask: String,
    /// Decorative outline for the mask. Declared by templates, never drawn.
    pub stroke: String,
    /// Full-surface background artwork.
    pub design_pattern: String,
}

/// Everything that describes one creative layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateModel {
    pub caption: CaptionStyle,
    pub cta: CtaStyle,
    /// Target rectangle for both the mask artwork and the user photo.
    pub image_mask: Rect,
    pub urls: AssetUrls,
}

impl TemplateModel {
    /// Parse a template from its JSON form.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the template to pretty-printed JSON.
    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a template JSON file from disk.
    pub fn load_from_file(path: &std::path::Path) -> CanvasResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

const TEMPLATE_CDN: &str = "https://d273i1jagfl543.cloudfront.net/templates";

impl Default for TemplateModel {
    /// The landscape apartment-listing template shipped with the editor.
    fn default() -> Self {
        Self {
            caption: CaptionStyle {
                text: "1 & 2 BHK Luxury Apartments at just Rs.34.97 Lakhs".to_string(),
                position: Position::new(50, 50),
                font_size: 44,
                alignment: TextAlign::Left,
                text_color: Color::WHITE,
                max_characters_per_line: 31,
            },
            cta: CtaStyle {
                text: "Shop Now".to_string(),
                position: Position::new(50, 100),
                font_size: 30,
                text_color: Color::BLACK,
                background_color: Color::WHITE,
                padding: "2vw".to_string(),
            },
            image_mask: Rect::new(56, 442, 970, 600),
            urls: AssetUrls {
                mask: format!("{TEMPLATE_CDN}/global_temp_landscape_temp_10_mask.png"),
                stroke: format!("{TEMPLATE_CDN}/global_temp_landscape_temp_10_Mask_stroke.png"),
                design_pattern: format!(
                    "{TEMPLATE_CDN}/global_temp_landscape_temp_10_Design_Pattern.png"
                ),
            },
        }
    }
}
