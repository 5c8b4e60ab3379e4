//! # adcanvas-ir
//!
//! The typed description of a creative: the template (caption, CTA, mask
//! geometry, artwork URLs) and the user-editable state rendered on top of it.

pub mod state;
pub mod template;
pub mod validate;

pub use state::{RenderState, DEFAULT_BACKGROUND};
pub use template::{AssetUrls, CaptionStyle, CtaStyle, TemplateModel};
pub use validate::{bounds_warnings, validate_template};
