//! Procedural star placement inside a periodic rectangular volume.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SkyError;

/// Default brightness baseline added to the uniform brightness draw.
pub const DEFAULT_BRIGHTNESS_BASELINE: f64 = 1.4;

/// The three periodic extents of the toroidal volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldDimensions {
    size: DVec3,
}

impl FieldDimensions {
    /// Create dimensions, rejecting non-positive or non-finite extents.
    pub fn new(size_x: f64, size_y: f64, size_z: f64) -> Result<Self, SkyError> {
        for (axis, value) in [("x", size_x), ("y", size_y), ("z", size_z)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SkyError::InvalidDimension { axis, value });
            }
        }
        Ok(Self {
            size: DVec3::new(size_x, size_y, size_z),
        })
    }

    /// A cube with the same period on every axis.
    pub fn cube(size: f64) -> Result<Self, SkyError> {
        Self::new(size, size, size)
    }

    /// Periods as a vector in field space.
    pub fn size(&self) -> DVec3 {
        self.size
    }

    /// Cull radius: half the extent of the vertical-governing (`y`) axis.
    pub fn max_view_distance(&self) -> f64 {
        self.size.y * 0.5
    }
}

/// A single point light in field space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarRecord {
    /// Position in field-space coordinates.
    pub position: DVec3,
    /// Multiplier applied to the photometric intensity.
    pub brightness: f64,
}

/// An immutable star population together with the volume it lives in.
#[derive(Clone, Debug)]
pub struct StarField {
    dimensions: FieldDimensions,
    stars: Vec<StarRecord>,
}

impl StarField {
    /// Wrap an existing star list.
    pub fn from_stars(dimensions: FieldDimensions, stars: Vec<StarRecord>) -> Self {
        Self { dimensions, stars }
    }

    pub fn dimensions(&self) -> &FieldDimensions {
        &self.dimensions
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// Generates star fields with uniformly distributed positions.
///
/// Each axis is sampled from `[-0.5, 0.5)` and scaled by that axis's period,
/// so generated positions are already in the canonical cell. Brightness is
/// `uniform(-0.5, 0.5) + brightness_baseline`.
pub struct StarFieldGenerator {
    dimensions: FieldDimensions,
    brightness_baseline: f64,
}

impl StarFieldGenerator {
    pub fn new(dimensions: FieldDimensions, brightness_baseline: f64) -> Self {
        Self {
            dimensions,
            brightness_baseline,
        }
    }

    /// Generate `count` stars from an entropy-seeded RNG. Not reproducible.
    pub fn generate(&self, count: usize) -> StarField {
        let mut rng = ChaCha8Rng::from_os_rng();
        self.generate_with_rng(&mut rng, count)
    }

    /// Generate `count` stars deterministically from `seed`.
    pub fn generate_seeded(&self, count: usize, seed: u64) -> StarField {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate_with_rng(&mut rng, count)
    }

    /// Generate `count` stars, drawing from the caller's RNG.
    pub fn generate_with_rng<R: Rng>(&self, rng: &mut R, count: usize) -> StarField {
        let size = self.dimensions.size();
        let mut stars = Vec::with_capacity(count);

        for _ in 0..count {
            let x = rng.random_range(-0.5_f64..0.5) * size.x;
            let y = rng.random_range(-0.5_f64..0.5) * size.y;
            let z = rng.random_range(-0.5_f64..0.5) * size.z;
            let brightness = rng.random_range(-0.5_f64..0.5) + self.brightness_baseline;

            stars.push(StarRecord {
                position: DVec3::new(x, y, z),
                brightness,
            });
        }

        log::debug!(
            "Generated {count} stars in a {}x{}x{} field",
            size.x,
            size.y,
            size.z
        );

        StarField::from_stars(self.dimensions, stars)
    }
}
