//! Whole-frame rendering: project every star, splat the visible ones.

use crate::error::SkyError;
use crate::frame::Frame;
use crate::projection::{Culled, ObserverState, Projector};
use crate::raster::{
    BlendMode, DEFAULT_REFERENCE_POINT_SIZE, DEFAULT_REFERENCE_WIDTH, Rasterizer,
};
use crate::starfield::StarField;

/// Fraction of the vertical period used as the default reference scale.
pub const DEFAULT_REFERENCE_SCALE_FRACTION: f64 = 0.15;

/// Everything needed to turn a star field into a frame, validated up front.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub image_width: u32,
    pub image_height: u32,
    /// Distance at which a unit-brightness star reaches full intensity.
    pub reference_scale: f64,
    pub reference_point_size: f64,
    pub reference_width: u32,
    pub blend_mode: BlendMode,
}

impl RenderSettings {
    /// Defaults for a given image size and vertical period (`size_y`).
    pub fn for_field(image_width: u32, image_height: u32, size_y: f64) -> Self {
        Self {
            image_width,
            image_height,
            reference_scale: size_y * DEFAULT_REFERENCE_SCALE_FRACTION,
            reference_point_size: DEFAULT_REFERENCE_POINT_SIZE,
            reference_width: DEFAULT_REFERENCE_WIDTH,
            blend_mode: BlendMode::Overwrite,
        }
    }
}

/// Per-frame counters, one bucket per star.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub coincident: usize,
    pub out_of_range: usize,
    pub too_dim: usize,
}

impl RenderStats {
    /// Total number of stars considered.
    pub fn total(&self) -> usize {
        self.drawn + self.coincident + self.out_of_range + self.too_dim
    }

    fn record(&mut self, culled: Culled) {
        match culled {
            Culled::Coincident => self.coincident += 1,
            Culled::OutOfRange => self.out_of_range += 1,
            Culled::TooDim => self.too_dim += 1,
        }
    }
}

/// Renders complete frames for a given observer position.
///
/// Stateless between calls: the same field and observer always produce the
/// same frame. Stars are drawn in field order, which matters for
/// [`BlendMode::Overwrite`].
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    projector: Projector,
    rasterizer: Rasterizer,
}

impl FrameRenderer {
    pub fn new(settings: &RenderSettings) -> Result<Self, SkyError> {
        Ok(Self {
            projector: Projector::new(
                settings.image_width,
                settings.image_height,
                settings.reference_scale,
            )?,
            rasterizer: Rasterizer::new(
                settings.reference_point_size,
                settings.reference_width,
                settings.blend_mode,
            )?,
        })
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Render one frame.
    pub fn render(&self, field: &StarField, observer: &ObserverState) -> Frame {
        self.render_with_stats(field, observer).0
    }

    /// Render one frame and report how many stars were drawn or skipped.
    pub fn render_with_stats(
        &self,
        field: &StarField,
        observer: &ObserverState,
    ) -> (Frame, RenderStats) {
        let mut frame = Frame::new(self.projector.image_width(), self.projector.image_height());
        let mut stats = RenderStats::default();
        let dims = field.dimensions();

        for star in field.stars() {
            match self.projector.classify(star, observer, dims) {
                Ok(projected) => {
                    self.rasterizer.splat(&mut frame, &projected);
                    stats.drawn += 1;
                }
                Err(culled) => stats.record(culled),
            }
        }

        log::trace!(
            "Rendered frame at ({:.3}, {:.3}, {:.3}): {stats:?}",
            observer.position.x,
            observer.position.y,
            observer.position.z
        );

        (frame, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::{FieldDimensions, StarFieldGenerator, StarRecord};
    use glam::DVec3;

    fn settings() -> RenderSettings {
        RenderSettings::for_field(320, 160, 50.0)
    }

    #[test]
    fn test_settings_defaults() {
        let s = settings();
        assert!((s.reference_scale - 7.5).abs() < 1e-12);
        assert_eq!(s.reference_point_size, 4.0);
        assert_eq!(s.reference_width, 4000);
        assert_eq!(s.blend_mode, BlendMode::Overwrite);
    }

    #[test]
    fn test_renderer_uses_configured_blend_mode() {
        let mut s = settings();
        s.blend_mode = BlendMode::SaturatingAdd;
        let renderer = FrameRenderer::new(&s).unwrap();
        assert_eq!(renderer.rasterizer().blend_mode(), BlendMode::SaturatingAdd);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut s = settings();
        s.image_height = 0;
        assert!(matches!(
            FrameRenderer::new(&s),
            Err(SkyError::InvalidImageSize { .. })
        ));

        let mut s = settings();
        s.reference_point_size = -1.0;
        assert!(FrameRenderer::new(&s).is_err());
    }

    #[test]
    fn test_empty_field_renders_blank_frame() {
        let dims = FieldDimensions::new(200.0, 50.0, 200.0).unwrap();
        let field = StarField::from_stars(dims, Vec::new());
        let renderer = FrameRenderer::new(&settings()).unwrap();
        let (frame, stats) = renderer.render_with_stats(&field, &ObserverState::origin());
        assert_eq!(frame.dimensions(), (320, 160));
        assert_eq!(frame.lit_pixel_count(), 0);
        assert_eq!(stats, RenderStats::default());
    }

    #[test]
    fn test_render_is_deterministic() {
        let dims = FieldDimensions::new(200.0, 50.0, 200.0).unwrap();
        let field = StarFieldGenerator::new(dims, 1.4).generate_seeded(2000, 42);
        let renderer = FrameRenderer::new(&settings()).unwrap();
        let observer = ObserverState::new(1.5, -2.0, 0.25);

        let a = renderer.render(&field, &observer);
        let b = renderer.render(&field, &observer);
        assert_eq!(a, b);
        assert!(a.lit_pixel_count() > 0);
    }

    #[test]
    fn test_stats_account_for_every_star() {
        let dims = FieldDimensions::new(200.0, 50.0, 200.0).unwrap();
        let field = StarFieldGenerator::new(dims, 1.4).generate_seeded(3000, 5);
        let renderer = FrameRenderer::new(&settings()).unwrap();
        let (_, stats) = renderer.render_with_stats(&field, &ObserverState::origin());
        assert_eq!(stats.total(), 3000);
        assert!(stats.drawn > 0);
        // Most of a 200x50x200 field lies beyond the 25-unit cull radius.
        assert!(stats.out_of_range > stats.drawn);
    }

    #[test]
    fn test_star_on_observer_draws_nothing() {
        let dims = FieldDimensions::cube(100.0).unwrap();
        let field = StarField::from_stars(
            dims,
            vec![StarRecord {
                position: DVec3::new(10.0, 10.0, 10.0),
                brightness: 1.4,
            }],
        );
        let renderer = FrameRenderer::new(&RenderSettings::for_field(320, 160, 100.0)).unwrap();
        // One period away on x and z: the wrapped displacement is zero.
        let observer = ObserverState::new(110.0, 10.0, -90.0);
        let (frame, stats) = renderer.render_with_stats(&field, &observer);
        assert_eq!(frame.lit_pixel_count(), 0);
        assert_eq!(stats.coincident, 1);
    }

    #[test]
    fn test_draw_order_matters_for_overwrite() {
        let dims = FieldDimensions::cube(100.0).unwrap();
        let near = StarRecord {
            position: DVec3::new(1.0, 0.0, 0.0),
            brightness: 1.0,
        };
        let far = StarRecord {
            position: DVec3::new(20.0, 0.0, 0.0),
            brightness: 1.0,
        };
        let renderer = FrameRenderer::new(&RenderSettings::for_field(320, 160, 100.0)).unwrap();
        let observer = ObserverState::origin();

        let near_last = renderer.render(&StarField::from_stars(dims, vec![far, near]), &observer);
        let far_last = renderer.render(&StarField::from_stars(dims, vec![near, far]), &observer);

        // Both stars land on the same center pixel; the last one wins there.
        assert_eq!(near_last.get_pixel(160, 80)[0], 255);
        assert!(far_last.get_pixel(160, 80)[0] < 255);
    }
}
