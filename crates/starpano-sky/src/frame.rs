//! An RGBA8 frame buffer for one rendered panorama.

/// A rendered frame stored as row-major RGBA pixels.
///
/// Created fresh per render, zero-initialized (transparent black). Stars
/// write `(v, v, v, 255)`, so the alpha channel marks star coverage when the
/// frame is composited over a background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Create a new transparent black frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes. Length = `width * height * 4`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Set a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Mutable access to one pixel's channels.
    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let idx = self.index(x, y);
        &mut self.pixels[idx..idx + 4]
    }

    /// Number of pixels with any non-zero channel.
    pub fn lit_pixel_count(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| px.iter().any(|&c| c != 0))
            .count()
    }

    /// Brightest red/green/blue channel value in the frame.
    #[cfg(test)]
    pub(crate) fn max_channel(&self) -> u8 {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| px[..3].iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Copy into an `image` buffer for encoding.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.get_pixel(x, y))
        })
    }
}
