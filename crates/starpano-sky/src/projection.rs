//! Star-to-raster projection: periodic displacement, culling, equirectangular
//! mapping and inverse-square photometry.

use std::f64::consts::PI;

use glam::{DVec2, DVec3};

use crate::error::SkyError;
use crate::starfield::{FieldDimensions, StarRecord};
use crate::wrap::view_space_displacement;

/// Observer position in field space.
///
/// The observer always looks along the fixed reference orientation; only
/// its position changes. The position itself is never wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObserverState {
    pub position: DVec3,
}

impl ObserverState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: DVec3::new(x, y, z),
        }
    }

    pub fn origin() -> Self {
        Self::default()
    }
}

impl From<DVec3> for ObserverState {
    fn from(position: DVec3) -> Self {
        Self { position }
    }
}

/// A star that survived projection and will be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedStar {
    /// Integer column, always `< image_width`.
    pub pixel_x: u32,
    /// Integer row, always `< image_height`.
    pub pixel_y: u32,
    /// Sub-pixel position in raster space, reduced to the image bounds.
    pub center: DVec2,
    /// Normalized photometric intensity in `(0, 1]`.
    pub intensity: f64,
    /// Angle above the horizontal view plane, in `[-pi/2, pi/2]`.
    pub altitude_radians: f64,
}

/// Why a star produced no pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Culled {
    /// The observer sits exactly on the star; direction is undefined.
    Coincident,
    /// The wrapped distance exceeds half the vertical period.
    OutOfRange,
    /// Intensity quantizes to zero.
    TooDim,
}

/// Quantize a `[0, 1]` intensity to an 8-bit channel value (truncating).
pub fn quantize_intensity(intensity: f64) -> u8 {
    (intensity * 255.0).clamp(0.0, 255.0) as u8
}

/// Maps stars onto an equirectangular raster of fixed size.
#[derive(Clone, Debug)]
pub struct Projector {
    image_width: u32,
    image_height: u32,
    reference_scale: f64,
}

impl Projector {
    /// `reference_scale` is the distance at which a unit-brightness star saturates.
    pub fn new(
        image_width: u32,
        image_height: u32,
        reference_scale: f64,
    ) -> Result<Self, SkyError> {
        if image_width == 0 || image_height == 0 {
            return Err(SkyError::InvalidImageSize {
                width: image_width,
                height: image_height,
            });
        }
        if !(reference_scale.is_finite() && reference_scale > 0.0) {
            return Err(SkyError::InvalidSetting {
                name: "reference_scale",
                value: reference_scale,
            });
        }
        Ok(Self {
            image_width,
            image_height,
            reference_scale,
        })
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Project one star, returning `None` when it contributes nothing.
    pub fn project(
        &self,
        star: &StarRecord,
        observer: &ObserverState,
        dims: &FieldDimensions,
    ) -> Option<ProjectedStar> {
        self.classify(star, observer, dims).ok()
    }

    /// Project one star, reporting the reason when it is skipped.
    pub fn classify(
        &self,
        star: &StarRecord,
        observer: &ObserverState,
        dims: &FieldDimensions,
    ) -> Result<ProjectedStar, Culled> {
        let d = view_space_displacement(star.position, observer.position, dims);

        let dist2 = d.length_squared();
        if dist2 == 0.0 {
            return Err(Culled::Coincident);
        }
        let max_dist = dims.max_view_distance();
        if dist2 > max_dist * max_dist {
            return Err(Culled::OutOfRange);
        }

        let n = d / dist2.sqrt();
        let altitude_radians = n.z.atan2((n.x * n.x + n.y * n.y).sqrt());
        let altitude = altitude_radians / PI + 0.5;
        let azimuth = n.y.atan2(n.x) / (2.0 * PI) + 0.5;

        let width = f64::from(self.image_width);
        let height = f64::from(self.image_height);
        let image_x = azimuth * width;
        let image_y = altitude * height;

        let scale2 = self.reference_scale * self.reference_scale;
        let intensity = ((scale2 / dist2) * star.brightness).clamp(0.0, 1.0);
        if quantize_intensity(intensity) == 0 {
            return Err(Culled::TooDim);
        }

        Ok(ProjectedStar {
            pixel_x: (image_x as u32) % self.image_width,
            pixel_y: (image_y as u32) % self.image_height,
            center: DVec2::new(image_x % width, image_y % height),
            intensity,
            altitude_radians,
        })
    }
}
