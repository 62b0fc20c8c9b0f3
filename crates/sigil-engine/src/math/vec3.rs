use core::ops::{Add, Mul, Sub};

/// 3D vector; the camera uses one for scale and translation so the unused
/// z component stays explicit.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length vector pointing the same way.
    ///
    /// The zero vector has no direction; its components divide to NaN.
    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        Vec3::new(self.x / len, self.y / len, self.z / len)
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Rotates around `axis` by `angle` radians (Rodrigues' formula).
    /// `axis` is normalized internally.
    pub fn rotated_about(self, axis: Vec3, angle: f32) -> Vec3 {
        let k = axis.normalized();
        let (sin, cos) = angle.sin_cos();
        self * cos + k.cross(self) * sin + k * (k.dot(self) * (1.0 - cos))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::FRAC_PI_2;

    // ── arithmetic ──────────────────────────────────────────────────────────

    #[test]
    fn add_sub_mul() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Vec3::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, Vec3::new(2.0, 1.5, 1.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    // ── length and direction ────────────────────────────────────────────────

    #[test]
    fn length_and_normalized() {
        let v = Vec3::new(2.0, 3.0, 6.0);
        assert_eq!(v.length(), 7.0);
        assert_relative_eq!(v.normalized().length(), 1.0, epsilon = 1e-6);
    }

    // ── products ────────────────────────────────────────────────────────────

    #[test]
    fn cross_of_basis_vectors() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn dot_matches_hand_computation() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -5.0, 6.0);
        assert_eq!(a.dot(b), 12.0);
    }

    // ── rotation ────────────────────────────────────────────────────────────

    #[test]
    fn quarter_turn_about_z_axis() {
        let p = Vec3::new(1.0, 0.0, 0.0).rotated_about(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_normalizes_the_axis() {
        // A scaled axis must give the same result as the unit axis.
        let v = Vec3::new(0.0, 2.0, 0.0);
        let a = v.rotated_about(Vec3::new(0.0, 0.0, 10.0), 0.7);
        let b = v.rotated_about(Vec3::new(0.0, 0.0, 1.0), 0.7);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-6);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-6);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-6);
    }
}
