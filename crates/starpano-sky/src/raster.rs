//! Anti-aliased disc rasterization with equirectangular polar correction.

use crate::error::SkyError;
use crate::frame::Frame;
use crate::projection::{ProjectedStar, quantize_intensity};

/// Default disc radius, in pixels, of a full-intensity star.
pub const DEFAULT_REFERENCE_POINT_SIZE: f64 = 4.0;

/// Default image width above which disc size grows with resolution.
pub const DEFAULT_REFERENCE_WIDTH: u32 = 4000;

/// Smallest radius drawn, so a faint star still covers its own pixel.
const MIN_RADIUS: f64 = 0.5;

/// How a star's disc combines with pixels already in the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Replace covered pixels with the star color; edge pixels are blended
    /// toward it by their coverage. Draw order matters.
    #[default]
    Overwrite,
    /// Add `color * coverage` with per-channel saturation. Order independent.
    SaturatingAdd,
}

/// Draws projected stars into a [`Frame`].
#[derive(Clone, Debug)]
pub struct Rasterizer {
    reference_point_size: f64,
    reference_width: u32,
    blend_mode: BlendMode,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            reference_point_size: DEFAULT_REFERENCE_POINT_SIZE,
            reference_width: DEFAULT_REFERENCE_WIDTH,
            blend_mode: BlendMode::Overwrite,
        }
    }
}

impl Rasterizer {
    pub fn new(
        reference_point_size: f64,
        reference_width: u32,
        blend_mode: BlendMode,
    ) -> Result<Self, SkyError> {
        if !(reference_point_size.is_finite() && reference_point_size > 0.0) {
            return Err(SkyError::InvalidSetting {
                name: "reference_point_size",
                value: reference_point_size,
            });
        }
        if reference_width == 0 {
            return Err(SkyError::InvalidSetting {
                name: "reference_width",
                value: 0.0,
            });
        }
        Ok(Self {
            reference_point_size,
            reference_width,
            blend_mode,
        })
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Disc radius of a full-intensity star at this output width.
    ///
    /// Constant below `reference_width`, proportional to width above it, so a
    /// star keeps the same angular size at high resolutions.
    pub fn size_scale(&self, image_width: u32) -> f64 {
        if image_width < self.reference_width {
            self.reference_point_size
        } else {
            self.reference_point_size * (f64::from(image_width) / f64::from(self.reference_width))
        }
    }

    /// Horizontal stretch compensating the `cos(altitude)` foreshortening of
    /// the equirectangular map. Fixed at 1.0 on the first and last rows.
    pub fn polar_correction(pixel_y: u32, altitude_radians: f64, image_height: u32) -> f64 {
        if pixel_y == 0 || pixel_y + 1 == image_height {
            1.0
        } else {
            1.0 / altitude_radians.cos()
        }
    }

    /// Draw one star as a filled anti-aliased ellipse.
    ///
    /// Columns wrap around the azimuth seam; rows are clipped at the poles.
    pub fn splat(&self, frame: &mut Frame, star: &ProjectedStar) {
        let (width, height) = frame.dimensions();
        let scale = star.intensity * self.size_scale(width);
        let correction = Self::polar_correction(star.pixel_y, star.altitude_radians, height);

        let half_width = f64::from(width) * 0.5;
        let rx = (scale * correction).clamp(MIN_RADIUS, half_width.max(MIN_RADIUS));
        let ry = scale.max(MIN_RADIUS);

        let value = quantize_intensity(star.intensity);
        let color = [value, value, value, u8::MAX];

        let cx = star.center.x;
        let cy = star.center.y;

        let y_min = ((cy - ry - 0.5).floor() as i64).max(0);
        let y_max = ((cy + ry + 0.5).ceil() as i64).min(i64::from(height) - 1);
        let x_min = (cx - rx - 0.5).floor() as i64;
        let x_max = ((cx + rx + 0.5).ceil() as i64).min(x_min + i64::from(width) - 1);

        for y in y_min..=y_max {
            let dy = y as f64 + 0.5 - cy;
            for x in x_min..=x_max {
                let dx = x as f64 + 0.5 - cx;
                let coverage = ellipse_coverage(dx, dy, rx, ry);
                if coverage <= 0.0 {
                    continue;
                }
                let column = x.rem_euclid(i64::from(width)) as u32;
                let pixel = frame.pixel_mut(column, y as u32);
                blend(pixel, color, coverage, self.blend_mode);
            }
        }
    }
}

/// Fraction of a pixel covered by an ellipse, from the approximate signed
/// distance between the pixel center and the ellipse boundary.
fn ellipse_coverage(dx: f64, dy: f64, rx: f64, ry: f64) -> f64 {
    let nx = dx / rx;
    let ny = dy / ry;
    let r = (nx * nx + ny * ny).sqrt();
    let signed_distance = if r == 0.0 {
        -rx.min(ry)
    } else {
        let dist = (dx * dx + dy * dy).sqrt();
        dist - dist / r
    };
    (0.5 - signed_distance).clamp(0.0, 1.0)
}

fn blend(pixel: &mut [u8], color: [u8; 4], coverage: f64, mode: BlendMode) {
    for (dst, &src) in pixel.iter_mut().zip(color.iter()) {
        let d = f64::from(*dst);
        let s = f64::from(src);
        *dst = match mode {
            BlendMode::Overwrite => (d + (s - d) * coverage).round() as u8,
            BlendMode::SaturatingAdd => dst.saturating_add((s * coverage).round() as u8),
        };
    }
}
