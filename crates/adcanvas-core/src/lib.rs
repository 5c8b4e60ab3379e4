//! # adcanvas-core
//!
//! Core types and primitives for the adcanvas creative renderer.
//! This crate contains foundational types shared across all adcanvas crates:
//! the RGBA frame buffer and its blend operations, colors, geometry,
//! configuration, content hashing, and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod math;
pub mod types;

pub use config::*;

pub use color::{Color, ColorError};
pub use error::{BoxError, CanvasError, CanvasResult};
pub use frame::{FrameBuffer, SURFACE_SIZE};
pub use hash::FrameHash;
pub use math::{Position, Rect};
pub use types::TextAlign;
