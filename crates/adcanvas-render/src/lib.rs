//! # adcanvas-render
//!
//! The adcanvas rendering engine. Takes a template and the editor state and
//! composites one 1080x1080 creative on the CPU: background, artwork layers,
//! the user photo seen through the mask, the wrapped caption and the CTA.

pub mod assets;
pub mod image_loader;
pub mod layout;
pub mod pipeline;
pub mod session;
pub mod text;
pub mod wrap;

pub use assets::{AssetCache, AssetLoader, AssetSource, DefaultSource, FileSource, HttpSource};
pub use layout::{CaptionLayout, CtaLayout};
pub use pipeline::{CompositingPipeline, RenderReport};
pub use session::{RenderInputs, RenderOutcome, RenderSession, SharedSurface};
pub use text::{FontTextPainter, TextPainter};
pub use wrap::wrap_lines;
