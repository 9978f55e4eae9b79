/// Minimal 3D vector used for nucleus and electron positions.
/// All operations return new values; nothing mutates in place.

use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3 { x, y, z }
    }

    /// Point in the screen plane (z = 0).
    pub const fn planar(x: f32, y: f32) -> Self {
        Vector3 { x, y, z: 0.0 }
    }

    /// Cartesian point from spherical coordinates (r, polar theta, azimuth phi).
    pub fn from_spherical(r: f32, theta: f32, phi: f32) -> Self {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Vector3 {
            x: r * sin_theta * cos_phi,
            y: r * sin_theta * sin_phi,
            z: r * cos_theta,
        }
    }

    pub fn add(self, other: Vector3) -> Self {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn subtract(self, other: Vector3) -> Self {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, s: f32) -> Self {
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length vector has no direction, so it normalizes to
    /// `Vector3::ZERO` instead of producing NaNs.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Vector3::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Projection onto the screen plane.
    pub fn xy(self) -> [f32; 2] {
        [self.x, self.y]
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::add(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, s: f32) -> Vector3 {
        self.scale(s)
    }
}

impl From<[f32; 2]> for Vector3 {
    fn from(p: [f32; 2]) -> Self {
        Vector3::planar(p[0], p[1])
    }
}
