//! Image loading module.
//! Decodes PNG, JPEG, WebP, and other formats into FrameBuffers, stretches
//! them to target rectangles, and encodes finished surfaces.

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};

use adcanvas_core::{CanvasError, CanvasResult, FrameBuffer};

/// Decode encoded image bytes. `origin` names the bytes in error messages.
pub fn decode_image(data: &[u8], origin: &str) -> CanvasResult<FrameBuffer> {
    let img = image::load_from_memory(data).map_err(|e| CanvasError::asset_decode(origin, e))?;
    Ok(rgba_to_frame(img.to_rgba8()))
}

/// Load an image file and convert it to a FrameBuffer.
pub fn load_image(path: &Path) -> CanvasResult<FrameBuffer> {
    let origin = path.display().to_string();
    let data = std::fs::read(path).map_err(|e| CanvasError::asset_fetch(&origin, e))?;
    decode_image(&data, &origin)
}

/// Stretch a frame buffer to exactly `width` x `height`, ignoring aspect ratio.
///
/// Uses bilinear filtering, matching smoothed canvas image draws.
pub fn resize_exact(fb: &FrameBuffer, width: u32, height: u32) -> FrameBuffer {
    if fb.width == width && fb.height == height {
        return fb.clone();
    }
    if width == 0 || height == 0 || fb.width == 0 || fb.height == 0 {
        return FrameBuffer::new(width, height);
    }
    let Some(src) = RgbaImage::from_raw(fb.width, fb.height, fb.data.clone()) else {
        return FrameBuffer::new(width, height);
    };
    rgba_to_frame(image::imageops::resize(&src, width, height, FilterType::Triangle))
}

/// Encode a frame buffer as PNG bytes.
pub fn encode_png(fb: &FrameBuffer) -> CanvasResult<Vec<u8>> {
    let img = frame_to_rgba(fb)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| CanvasError::Render(format!("failed to encode PNG: {}", e)))?;
    Ok(out.into_inner())
}

/// Write a frame buffer to `path` as PNG.
pub fn save_png(fb: &FrameBuffer, path: &Path) -> CanvasResult<()> {
    let bytes = encode_png(fb)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn rgba_to_frame(rgba: RgbaImage) -> FrameBuffer {
    let (width, height) = rgba.dimensions();
    FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

fn frame_to_rgba(fb: &FrameBuffer) -> CanvasResult<RgbaImage> {
    RgbaImage::from_raw(fb.width, fb.height, fb.data.clone()).ok_or_else(|| {
        CanvasError::Render(format!(
            "frame buffer holds {} bytes, expected {}x{} RGBA",
            fb.data.len(),
            fb.width,
            fb.height
        ))
    })
}
