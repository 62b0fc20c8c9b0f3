use core::ops::{Add, Mul, Sub};

/// 2D vector in world units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit-length vector pointing the same way.
    ///
    /// The zero vector has no direction; its components divide to NaN.
    #[inline]
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        Vec2::new(self.x / len, self.y / len)
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Signed cross products `(y·bx − x·by, x·by − y·bx)`.
    ///
    /// Both components carry the 2D cross magnitude with opposite signs;
    /// either one serves as a winding test against `rhs`.
    #[inline]
    pub fn cross(self, rhs: Vec2) -> Vec2 {
        Vec2::new(
            self.y * rhs.x - self.x * rhs.y,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Rotates the point around `origin` by `angle` radians.
    #[inline]
    pub fn rotated_around(self, origin: Vec2, angle: f32) -> Vec2 {
        let x = self.x - origin.x;
        let y = self.y - origin.y;
        let (sin, cos) = angle.sin_cos();
        Vec2::new(
            origin.x + x * cos - y * sin,
            origin.y + x * sin + y * cos,
        )
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}
