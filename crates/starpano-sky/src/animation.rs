//! Observer sweep: a finite sequence of frames along the field's x axis.

use glam::DVec3;

use crate::frame::Frame;
use crate::projection::ObserverState;
use crate::renderer::{FrameRenderer, RenderStats};
use crate::starfield::StarField;

/// One rendered step of an [`Animation`].
#[derive(Clone, Debug)]
pub struct AnimationFrame {
    /// Zero-based position in the sequence.
    pub sequence: u64,
    /// Observer position this frame was rendered from.
    pub observer: ObserverState,
    pub frame: Frame,
    pub stats: RenderStats,
}

/// Advances the observer along +x by a fixed step, rendering one frame per
/// step until the observer's x exceeds `max_x`.
///
/// Positions are computed as `start + sequence * step_delta` rather than by
/// repeated addition, so long sweeps do not drift.
pub struct Animation<'a> {
    renderer: &'a FrameRenderer,
    field: &'a StarField,
    start: DVec3,
    step_delta: f64,
    max_x: f64,
    sequence: u64,
}

impl<'a> Animation<'a> {
    /// `step_delta` must be positive for the sweep to terminate; a
    /// non-positive step yields no frames.
    pub fn new(
        renderer: &'a FrameRenderer,
        field: &'a StarField,
        start: ObserverState,
        step_delta: f64,
        max_x: f64,
    ) -> Self {
        Self {
            renderer,
            field,
            start: start.position,
            step_delta,
            max_x,
            sequence: 0,
        }
    }

    /// Observer position for the next frame.
    pub fn observer(&self) -> ObserverState {
        let offset = self.step_delta * self.sequence as f64;
        ObserverState::from(self.start + DVec3::new(offset, 0.0, 0.0))
    }

    /// Number of frames the sweep produces in total.
    pub fn frame_count(&self) -> u64 {
        if !self.step_delta.is_finite() || self.step_delta <= 0.0 || self.start.x > self.max_x {
            return 0;
        }
        // Tolerate rounding in the division so `max_x` itself is reached.
        // The cast saturates for sweeps too long to count.
        let steps = ((self.max_x - self.start.x) / self.step_delta + 1e-9).floor() as u64;
        steps.saturating_add(1)
    }

    /// Render the next frame, or `None` once the sweep is complete.
    pub fn advance(&mut self) -> Option<AnimationFrame> {
        if self.sequence >= self.frame_count() {
            return None;
        }
        let observer = self.observer();
        let (frame, stats) = self.renderer.render_with_stats(self.field, &observer);
        let sequence = self.sequence;
        self.sequence += 1;

        log::debug!(
            "Frame {sequence}: observer x = {:.3}, {} drawn, {} culled",
            observer.position.x,
            stats.drawn,
            stats.total() - stats.drawn
        );

        Some(AnimationFrame {
            sequence,
            observer,
            frame,
            stats,
        })
    }
}

impl Iterator for Animation<'_> {
    type Item = AnimationFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame_count().saturating_sub(self.sequence);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderSettings;
    use crate::starfield::{FieldDimensions, StarFieldGenerator};

    fn fixture() -> (FrameRenderer, StarField) {
        let dims = FieldDimensions::new(40.0, 20.0, 40.0).unwrap();
        let field = StarFieldGenerator::new(dims, 1.4).generate_seeded(200, 3);
        let renderer = FrameRenderer::new(&RenderSettings::for_field(64, 32, 20.0)).unwrap();
        (renderer, field)
    }

    #[test]
    fn test_sweep_is_finite_and_inclusive() {
        let (renderer, field) = fixture();
        let anim = Animation::new(&renderer, &field, ObserverState::origin(), 0.5, 2.0);
        assert_eq!(anim.frame_count(), 5);
        let frames: Vec<_> = anim.collect();
        assert_eq!(frames.len(), 5);
        let xs: Vec<f64> = frames.iter().map(|f| f.observer.position.x).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        let seqs: Vec<u64> = frames.iter().map(|f| f.sequence).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_huge_sweep_count_saturates() {
        let (renderer, field) = fixture();
        let anim = Animation::new(&renderer, &field, ObserverState::origin(), 1.0, 1.0e20);
        assert_eq!(anim.frame_count(), u64::MAX);
        let mut anim = Animation::new(&renderer, &field, ObserverState::origin(), 1.0, 1.0e20);
        assert_eq!(anim.next().map(|f| f.sequence), Some(0));
    }

    #[test]
    fn test_sweep_keeps_y_and_z() {
        let (renderer, field) = fixture();
        let mut anim = Animation::new(
            &renderer,
            &field,
            ObserverState::new(1.0, 2.0, 3.0),
            0.25,
            1.5,
        );
        let second = anim.nth(1).unwrap();
        assert_eq!(second.observer, ObserverState::new(1.25, 2.0, 3.0));
    }

    #[test]
    fn test_start_beyond_max_yields_nothing() {
        let (renderer, field) = fixture();
        let start = ObserverState::new(5.0, 0.0, 0.0);
        let mut anim = Animation::new(&renderer, &field, start, 0.1, 1.0);
        assert_eq!(anim.frame_count(), 0);
        assert!(anim.advance().is_none());
    }

    #[test]
    fn test_non_positive_step_yields_nothing() {
        let (renderer, field) = fixture();
        let anim = Animation::new(&renderer, &field, ObserverState::origin(), 0.0, 1.0);
        assert_eq!(anim.count(), 0);
    }

    #[test]
    fn test_frames_match_direct_render() {
        let (renderer, field) = fixture();
        let mut anim = Animation::new(&renderer, &field, ObserverState::origin(), 0.5, 1.0);
        let step = anim.nth(2).unwrap();
        let direct = renderer.render(&field, &ObserverState::new(1.0, 0.0, 0.0));
        assert_eq!(step.frame, direct);
    }

    #[test]
    fn test_size_hint_counts_down() {
        let (renderer, field) = fixture();
        let mut anim = Animation::new(&renderer, &field, ObserverState::origin(), 1.0, 3.0);
        assert_eq!(anim.size_hint(), (4, Some(4)));
        anim.next();
        assert_eq!(anim.size_hint(), (3, Some(3)));
    }
}
