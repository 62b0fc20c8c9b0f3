//! Scalar interpolation and range helpers.

/// Linear interpolation from `a` to `b` by factor `t`.
///
/// `t` outside `[0, 1]` extrapolates.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// `value` limited to `[min, max]`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Frame-rate-independent interpolation from `a` toward `b`.
///
/// A lerp variant whose factor comes from the elapsed time: `rate` plays
/// the role of lerp's `t`, and chasing a target with `decay` every frame
/// converges along the same exponential whatever the frame rate.
#[inline]
pub fn decay(a: f32, b: f32, rate: f32, delta: f32) -> f32 {
    b + (a - b) * (-rate * delta).exp()
}
