use crate::color::Color;
use crate::math::Rect;

/// Edge length of the square creative surface, in pixels.
pub const SURFACE_SIZE: u32 = 1080;

/// An 8-bit straight-alpha RGBA raster (4 bytes per pixel, row-major).
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Raw pixel data.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl FrameBuffer {
    /// Create a new frame buffer filled with zeros (transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize) * 4;
        Self {
            data: vec![0u8; size],
            width,
            height,
        }
    }

    /// Create a frame buffer filled with a solid color.
    pub fn solid(width: u32, height: u32, color: &Color) -> Self {
        let mut fb = Self::new(width, height);
        fb.fill(color);
        fb
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Total byte size of the pixel data.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// The whole buffer as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Get the RGBA value at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some([self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]])
    }

    /// Set the RGBA value at a pixel coordinate. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + 4].copy_from_slice(&rgba);
    }

    /// Blend one straight-alpha pixel over the buffer. No-op if out of bounds.
    pub fn blend_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let o = self.offset(x as u32, y as u32);
        blend_over(&rgba, &mut self.data[o..o + 4]);
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Paint every pixel with `color`, blending when it is translucent.
    pub fn fill(&mut self, color: &Color) {
        let bounds = self.bounds();
        self.fill_rect(bounds, color);
    }

    /// Paint `rect` with `color`. The rectangle is clipped to the buffer.
    pub fn fill_rect(&mut self, rect: Rect, color: &Color) {
        let pixel = color.to_rgba8();
        let x0 = rect.x.max(0) as i64;
        let y0 = rect.y.max(0) as i64;
        let x1 = rect.right().min(self.width as i64);
        let y1 = rect.bottom().min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize * 4;
        for y in y0..y1 {
            let start = y as usize * stride + x0 as usize * 4;
            let end = y as usize * stride + x1 as usize * 4;
            for d in self.data[start..end].chunks_exact_mut(4) {
                blend_over(&pixel, d);
            }
        }
    }

    /// Apply an alpha mask to this layer. Pixels outside the mask become transparent.
    ///
    /// Each pixel's alpha is multiplied by the alpha of the mask pixel that
    /// lands on it when the mask is placed at `(ox, oy)`.
    pub fn apply_mask(&mut self, mask: &FrameBuffer, ox: i32, oy: i32) {
        let width = self.width as i64;
        for y in 0..self.height as i64 {
            for x in 0..width {
                let dst_idx = ((y * width + x) * 4 + 3) as usize;
                let mx = x - ox as i64;
                let my = y - oy as i64;
                let inside = mx >= 0 && my >= 0 && mx < mask.width as i64 && my < mask.height as i64;
                if !inside {
                    self.data[dst_idx] = 0;
                    continue;
                }
                let mask_a = mask.data[((my * mask.width as i64 + mx) * 4 + 3) as usize] as u32;
                let current_a = self.data[dst_idx] as u32;
                self.data[dst_idx] = ((current_a * mask_a + 127) / 255) as u8;
            }
        }
    }

    /// Alpha-composite `src` on top of `self` at position (dx, dy).
    /// Uses integer math laid out for auto-vectorization.
    pub fn composite_over(&mut self, src: &FrameBuffer, dx: i32, dy: i32) {
        let dst_width = self.width as i64;
        let dst_height = self.height as i64;
        let (dx, dy) = (dx as i64, dy as i64);

        let mut start_y = 0;
        let mut end_y = src.height as i64;
        let mut start_x = 0;
        let mut end_x = src.width as i64;

        if dy < 0 {
            start_y = -dy;
        }
        if dy + end_y > dst_height {
            end_y = dst_height - dy;
        }
        if dx < 0 {
            start_x = -dx;
        }
        if dx + end_x > dst_width {
            end_x = dst_width - dx;
        }

        if start_x >= end_x || start_y >= end_y {
            return;
        }

        let src_stride = src.width as usize * 4;
        let dst_stride = self.width as usize * 4;

        for sy in start_y..end_y {
            let dst_y = dy + sy;
            let src_row_start = (sy as usize * src_stride) + (start_x as usize * 4);
            let dst_row_start = (dst_y as usize * dst_stride) + ((dx + start_x) as usize * 4);
            let len = (end_x - start_x) as usize * 4;

            let src_slice = &src.data[src_row_start..src_row_start + len];
            let dst_slice = &mut self.data[dst_row_start..dst_row_start + len];

            for (s, d) in src_slice.chunks_exact(4).zip(dst_slice.chunks_exact_mut(4)) {
                blend_over(s, d);
            }
        }
    }
}

/// Porter-Duff "source over" for one straight-alpha pixel.
fn blend_over(s: &[u8], d: &mut [u8]) {
    let sa = s[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        d.copy_from_slice(&s[..4]);
        return;
    }

    let da = d[3] as u32;
    let inv_sa = 255 - sa;
    let out_a = sa + ((da * inv_sa) / 255);
    if out_a == 0 {
        return;
    }

    for c in 0..3 {
        let sc = s[c] as u32;
        let dc = d[c] as u32;
        d[c] = ((sc * sa * 255 + dc * da * inv_sa) / (out_a * 255)) as u8;
    }
    d[3] = out_a as u8;
}
