use bytemuck::{Pod, Zeroable};
use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Per-channel linear interpolation toward `other`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// CPU raster target the compositing pass draws into. The host presents
/// `as_bytes()` however it likes; the engine only clears, gradient-fills and
/// blits into it.
pub struct RenderTarget {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::TRANSPARENT; (width * height) as usize];
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Rgba::TRANSPARENT
        }
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn fill_vertical_gradient(&mut self, top: Rgba, bottom: Rgba) {
        for y in 0..self.height {
            let t = if self.height > 1 {
                y as f32 / (self.height - 1) as f32
            } else {
                0.0
            };
            let color = top.lerp(bottom, t);
            let row = (y * self.width) as usize;
            self.pixels[row..row + self.width as usize].fill(color);
        }
    }

    /// Blits `image` scaled uniformly by `scale` with its top-left corner at
    /// `(origin_x, origin_y)` in pixels, modulated by `alpha` and composited
    /// source-over. Nearest-neighbor sampling, clipped to the target bounds.
    pub fn draw_image(
        &mut self,
        image: &RgbaImage,
        origin_x: f32,
        origin_y: f32,
        scale: f32,
        alpha: f32,
    ) {
        if scale <= 0.0 || alpha <= 0.0 {
            return;
        }

        let (src_w, src_h) = image.dimensions();
        let dst_w = src_w as f32 * scale;
        let dst_h = src_h as f32 * scale;

        let x0 = origin_x.floor().max(0.0) as u32;
        let y0 = origin_y.floor().max(0.0) as u32;
        let x1 = ((origin_x + dst_w).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((origin_y + dst_h).ceil().max(0.0) as u32).min(self.height);

        let alpha = alpha.min(1.0);

        for dy in y0..y1 {
            for dx in x0..x1 {
                let sx = ((dx as f32 + 0.5 - origin_x) / scale) as i64;
                let sy = ((dy as f32 + 0.5 - origin_y) / scale) as i64;
                if sx < 0 || sy < 0 || sx >= src_w as i64 || sy >= src_h as i64 {
                    continue;
                }

                let src = image.get_pixel(sx as u32, sy as u32).0;
                let a = src[3] as f32 / 255.0 * alpha;
                if a <= 0.0 {
                    continue;
                }

                let idx = (dy * self.width + dx) as usize;
                let dst = self.pixels[idx];
                let blend =
                    |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
                self.pixels[idx] = Rgba::new(
                    blend(src[0], dst.r),
                    blend(src[1], dst.g),
                    blend(src[2], dst.b),
                    (a * 255.0 + dst.a as f32 * (1.0 - a)).round() as u8,
                );
            }
        }
    }
}
