//! Periodic (toroidal) coordinate reduction and the field-to-view axis mapping.

use glam::DVec3;

use crate::starfield::FieldDimensions;

/// Reduce `value` into the centered range `(-period / 2, period / 2]` of one periodic axis.
///
/// The result is congruent to `value` modulo `period`. The boundary value
/// `+period / 2` is kept as is; `-period / 2` folds up to `+period / 2`.
/// Values already in range are returned untouched, which makes the reduction
/// exactly idempotent.
///
/// `period` must be positive; [`FieldDimensions`] guarantees that for every
/// call made by the projector.
pub fn wrap(value: f64, period: f64) -> f64 {
    let half = period * 0.5;
    if value <= half && value > -half {
        return value;
    }

    // Jump close to the target range, then settle the edge convention.
    let mut v = value - period * (value / period).round();
    while v > half {
        v -= period;
    }
    while v <= -half {
        v += period;
    }
    v
}

/// Permute a field-space vector into view space.
///
/// Field `x` and `z` become the two horizontal view axes, field `y` becomes
/// the vertical (altitude) axis: `(x, y, z) -> (x, z, y)`. The field's `y`
/// extent is usually the smallest, so it bounds the vertical field of view
/// while `x` spans the wide panorama.
pub fn field_to_view(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y)
}

/// Wrapped displacement from `observer` to `star`, expressed in view space.
///
/// Each field axis is wrapped by its own period before the axes are permuted,
/// so the returned vector is `(wrap(dx, size_x), wrap(dz, size_z), wrap(dy, size_y))`.
pub fn view_space_displacement(star: DVec3, observer: DVec3, dims: &FieldDimensions) -> DVec3 {
    let d = star - observer;
    let size = dims.size();
    field_to_view(DVec3::new(
        wrap(d.x, size.x),
        wrap(d.y, size.y),
        wrap(d.z, size.z),
    ))
}
