use bytemuck::{Pod, Zeroable};
use core::ops::{Index, IndexMut};

use super::Vec3;

/// 4×4 matrix stored as 16 contiguous floats with the translation in cells
/// 12..14. The flat layout is exactly what WGSL's `mat4x4f` reads from a
/// uniform buffer, so a composed matrix uploads as-is.
///
/// Operations come in pairs: an owned form returning a fresh matrix, and an
/// `_into` form writing into (and returning) a caller-provided output so a
/// long-lived matrix can be recomposed without churn. `translate_assign` and
/// `scale_assign` mutate in place for the recompose-one-buffer pattern the
/// camera uses.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Orthographic projection over the given volume.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let mut out = Mat4::IDENTITY;
        Mat4::orthographic_into(left, right, bottom, top, near, far, &mut out);
        out
    }

    /// Writes an orthographic projection into `out` and returns it.
    ///
    /// Keeping the volume non-degenerate (`right != left` and so on) is the
    /// caller's contract; equal extents divide by zero.
    pub fn orthographic_into<'a>(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        out: &'a mut Mat4,
    ) -> &'a mut Mat4 {
        let m = &mut out.0;
        m[0] = 2.0 / (right - left);
        m[1] = 0.0;
        m[2] = 0.0;
        m[3] = 0.0;
        m[4] = 0.0;
        m[5] = 2.0 / (top - bottom);
        m[6] = 0.0;
        m[7] = 0.0;
        m[8] = 0.0;
        m[9] = 0.0;
        m[10] = -2.0 / (far - near);
        m[11] = 0.0;
        m[12] = -(right + left) / (right - left);
        m[13] = -(top + bottom) / (top - bottom);
        m[14] = -(far + near) / (far - near);
        m[15] = 1.0;
        out
    }

    /// Product `self × rhs` over the flat row-major layout.
    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        let mut out = Mat4::IDENTITY;
        self.multiply_into(rhs, &mut out);
        out
    }

    /// Writes `self × rhs` into `out` and returns it. `rhs` may alias `self`.
    pub fn multiply_into<'a>(&self, rhs: &Mat4, out: &'a mut Mat4) -> &'a mut Mat4 {
        let a = &self.0;
        let b = &rhs.0;
        for row in 0..4 {
            let i = row * 4;
            let (a0, a1, a2, a3) = (a[i], a[i + 1], a[i + 2], a[i + 3]);
            out.0[i] = a0 * b[0] + a1 * b[4] + a2 * b[8] + a3 * b[12];
            out.0[i + 1] = a0 * b[1] + a1 * b[5] + a2 * b[9] + a3 * b[13];
            out.0[i + 2] = a0 * b[2] + a1 * b[6] + a2 * b[10] + a3 * b[14];
            out.0[i + 3] = a0 * b[3] + a1 * b[7] + a2 * b[11] + a3 * b[15];
        }
        out
    }

    /// Product of `self` and a translation by `v`.
    pub fn translate(&self, v: Vec3) -> Mat4 {
        let mut out = Mat4::IDENTITY;
        self.translate_into(v, &mut out);
        out
    }

    /// Writes `self × T(v)` into `out` and returns it.
    pub fn translate_into<'a>(&self, v: Vec3, out: &'a mut Mat4) -> &'a mut Mat4 {
        let mut t = Mat4::IDENTITY;
        t.0[12] = v.x;
        t.0[13] = v.y;
        t.0[14] = v.z;
        self.multiply_into(&t, out)
    }

    /// In-place `self = self × T(v)`.
    ///
    /// Equivalent to [`translate_into`](Mat4::translate_into) with the output
    /// aliasing `self`, expressed with per-row temporaries so the borrow is
    /// sound.
    pub fn translate_assign(&mut self, v: Vec3) -> &mut Mat4 {
        let m = &mut self.0;
        for row in 0..4 {
            let i = row * 4;
            let w = m[i + 3];
            m[i] += w * v.x;
            m[i + 1] += w * v.y;
            m[i + 2] += w * v.z;
        }
        self
    }

    /// Scaled copy: basis cells 0..3 by `v.x`, 4..7 by `v.y`, 8..11 by `v.z`.
    /// The returned matrix carries the identity translation row.
    pub fn scale(&self, v: Vec3) -> Mat4 {
        let mut out = Mat4::IDENTITY;
        self.scale_into(v, &mut out);
        out
    }

    /// Writes the scaled basis cells into `out` and returns it.
    ///
    /// Cells 12..15 of `out` keep their prior values; only the three basis
    /// rows are written.
    pub fn scale_into<'a>(&self, v: Vec3, out: &'a mut Mat4) -> &'a mut Mat4 {
        for i in 0..4 {
            out.0[i] = self.0[i] * v.x;
            out.0[i + 4] = self.0[i + 4] * v.y;
            out.0[i + 8] = self.0[i + 8] * v.z;
        }
        out
    }

    /// In-place scale of the basis cells; cells 12..15 are untouched.
    pub fn scale_assign(&mut self, v: Vec3) -> &mut Mat4 {
        let m = &mut self.0;
        for i in 0..4 {
            m[i] *= v.x;
            m[i + 4] *= v.y;
            m[i + 8] *= v.z;
        }
        self
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Index<usize> for Mat4 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x, y, z)
    }

    // ── orthographic ────────────────────────────────────────────────────────

    #[test]
    fn orthographic_unit_volume() {
        let m = Mat4::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0);
        assert_eq!(m[0], 1.0);
        assert_eq!(m[5], 1.0);
        assert_relative_eq!(m[10], -0.02, epsilon = 1e-4);
        assert_eq!(m[15], 1.0);
    }

    #[test]
    fn orthographic_screen_volume() {
        // Top-left origin: x maps [0, 800] to [-1, 1], y maps [0, 600] to
        // [1, -1] (y grows downward on screen).
        let m = Mat4::orthographic(0.0, 800.0, 600.0, 0.0, 100.0, -100.0);
        assert_relative_eq!(m[0], 2.0 / 800.0);
        assert_relative_eq!(m[5], -2.0 / 600.0);
        assert_relative_eq!(m[10], 0.01);
        assert_eq!(m[12], -1.0);
        assert_eq!(m[13], 1.0);
        assert_eq!(m[14], 0.0);
        assert_eq!(m[15], 1.0);
        // Off-diagonal cells stay zero.
        for i in [1, 2, 3, 4, 6, 7, 8, 9, 11] {
            assert_eq!(m[i], 0.0);
        }
    }

    #[test]
    fn orthographic_into_returns_its_output() {
        let mut out = Mat4::IDENTITY;
        let ret: *const Mat4 = Mat4::orthographic_into(0.0, 8.0, 6.0, 0.0, 1.0, -1.0, &mut out);
        assert!(core::ptr::eq(ret, &out));
    }

    // ── multiply ────────────────────────────────────────────────────────────

    #[test]
    fn multiply_by_identity_is_noop() {
        let m = Mat4::orthographic(0.0, 640.0, 480.0, 0.0, 100.0, -100.0);
        assert_eq!(m.multiply(&Mat4::IDENTITY), m);
        assert_eq!(Mat4::IDENTITY.multiply(&m), m);
    }

    #[test]
    fn multiply_known_product() {
        // Diagonal scale times a pure translation.
        let mut a = Mat4::IDENTITY;
        a[0] = 2.0;
        a[5] = 3.0;
        a[10] = 4.0;
        let mut b = Mat4::IDENTITY;
        b[12] = 5.0;
        b[13] = 6.0;
        b[14] = 7.0;

        let p = a.multiply(&b);
        assert_eq!(p[0], 2.0);
        assert_eq!(p[5], 3.0);
        assert_eq!(p[10], 4.0);
        assert_eq!(p[12], 5.0);
        assert_eq!(p[13], 6.0);
        assert_eq!(p[14], 7.0);
        assert_eq!(p[15], 1.0);
    }

    #[test]
    fn multiply_into_returns_its_output() {
        let a = Mat4::IDENTITY;
        let b = Mat4::IDENTITY;
        let mut out = Mat4::IDENTITY;
        let ret: *const Mat4 = a.multiply_into(&b, &mut out);
        assert!(core::ptr::eq(ret, &out));
    }

    #[test]
    fn multiply_accepts_aliased_operands() {
        let mut a = Mat4::IDENTITY;
        a[0] = 2.0;
        a[12] = 3.0;
        let mut out = Mat4::IDENTITY;
        a.multiply_into(&a, &mut out);
        assert_eq!(out[0], 4.0);
        assert_eq!(out[12], 9.0);
    }

    // ── translate ───────────────────────────────────────────────────────────

    #[test]
    fn translate_preserves_projection_basis() {
        let m = Mat4::orthographic(0.0, 800.0, 600.0, 0.0, 100.0, -100.0);
        let t = m.translate(v(0.5, 0.25, 0.0));
        // Basis cells are untouched because the source bottom row weights
        // (cells 3, 7, 11) are zero for a projection matrix.
        assert_eq!(&t.0[..12], &m.0[..12]);
        assert_eq!(t[12], m[12] + 0.5);
        assert_eq!(t[13], m[13] + 0.25);
        assert_eq!(t[14], m[14]);
        assert_eq!(t[15], 1.0);
    }

    #[test]
    fn translate_and_scale_into_return_their_output() {
        let m = Mat4::orthographic(0.0, 800.0, 600.0, 0.0, 100.0, -100.0);

        let mut out = Mat4::IDENTITY;
        let ret: *const Mat4 = m.translate_into(v(1.0, 2.0, 0.0), &mut out);
        assert!(core::ptr::eq(ret, &out));

        let ret: *const Mat4 = m.scale_into(v(2.0, 2.0, 1.0), &mut out);
        assert!(core::ptr::eq(ret, &out));
    }

    #[test]
    fn translate_assign_matches_translate_into() {
        let base = Mat4::orthographic(0.0, 320.0, 240.0, 0.0, 10.0, -10.0);
        let shift = v(-3.0, 4.5, 0.0);

        let mut expected = Mat4::IDENTITY;
        base.translate_into(shift, &mut expected);

        let mut assigned = base;
        assigned.translate_assign(shift);

        assert_eq!(assigned, expected);
    }

    // ── scale ───────────────────────────────────────────────────────────────

    #[test]
    fn scale_into_leaves_translation_cells() {
        let m = Mat4::orthographic(0.0, 800.0, 600.0, 0.0, 100.0, -100.0);
        let mut out = Mat4::IDENTITY;
        out[12] = 9.0;
        out[13] = 8.0;
        out[14] = 7.0;
        out[15] = 6.0;

        m.scale_into(v(2.0, 3.0, 1.0), &mut out);
        assert_relative_eq!(out[0], 2.0 * 2.0 / 800.0, epsilon = 1e-6);
        assert_relative_eq!(out[5], 3.0 * -2.0 / 600.0, epsilon = 1e-6);
        assert_relative_eq!(out[10], 0.01);
        assert_eq!(out[12], 9.0);
        assert_eq!(out[13], 8.0);
        assert_eq!(out[14], 7.0);
        assert_eq!(out[15], 6.0);
    }

    #[test]
    fn scale_assign_matches_scale_into() {
        let base = Mat4::orthographic(0.0, 800.0, 600.0, 0.0, 100.0, -100.0);
        let mut expected = base;
        base.scale_into(v(2.0, 0.5, 1.0), &mut expected);

        let mut assigned = base;
        assigned.scale_assign(v(2.0, 0.5, 1.0));
        assert_eq!(assigned, expected);
    }

    // ── composition ─────────────────────────────────────────────────────────

    #[test]
    fn projection_scale_translate_chain() {
        // The camera recomposes in this exact order each time it changes.
        let mut m = Mat4::IDENTITY;
        Mat4::orthographic_into(0.0, 800.0, 600.0, 0.0, 100.0, -100.0, &mut m);
        m.scale_assign(v(2.0, 2.0, 1.0));
        m.translate_assign(v(-0.5, -0.25, 0.0));

        assert_relative_eq!(m[0], 0.005);
        assert_relative_eq!(m[5], -2.0 / 300.0);
        assert_relative_eq!(m[10], 0.01);
        assert_eq!(m[12], -1.5);
        assert_eq!(m[13], 0.75);
        assert_eq!(m[14], 0.0);
        assert_eq!(m[15], 1.0);
    }
}
