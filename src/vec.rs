//! 3D vector and 3x3 matrix types for the cloth pipeline.

use crate::float::Float;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// --------------------------------------------------------------------------
// Vec3<F>: 3D vector
// --------------------------------------------------------------------------

/// 3D vector used for positions, velocities, and forces.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    /// Zero vector.
    pub fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }

    /// Vector with all components set to the same value.
    pub fn splat(value: F) -> Self { Vec3 { x: value, y: value, z: value } }

    /// Unit vector along +Y.
    pub fn unit_y() -> Self { Vec3 { x: F::zero(), y: F::one(), z: F::zero() } }

    /// Dot product.
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// 3D cross product.
    pub fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Scale all components by a scalar.
    pub fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F { self.dot(self) }

    /// Length (magnitude).
    pub fn length(self) -> F { self.length_sq().sqrt() }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    pub fn normalize(self) -> Self {
        self.try_normalize(F::from_f32(1e-10)).unwrap_or_else(Self::zero)
    }

    /// Normalize, or `None` when the length is below `epsilon`.
    pub fn try_normalize(self, epsilon: F) -> Option<Self> {
        let len = self.length();
        if len.is_near_zero(epsilon) {
            None
        } else {
            Some(self.scale(F::one() / len))
        }
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F { (self - other).length() }

    /// Squared distance between two points.
    pub fn distance_sq(self, other: Self) -> F { (self - other).length_sq() }

    /// True when no component is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> AddAssign for Vec3<F> {
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

impl<F: Float> SubAssign for Vec3<F> {
    fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
}

// --------------------------------------------------------------------------
// Mat3<F>: 3x3 matrix, column major
// --------------------------------------------------------------------------

/// Column-major 3x3 matrix. Used as the linear part of obstacle transforms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat3<F: Float> {
    pub x_axis: Vec3<F>,
    pub y_axis: Vec3<F>,
    pub z_axis: Vec3<F>,
}

impl<F: Float> Mat3<F> {
    /// Matrix from its three columns.
    pub fn from_cols(x_axis: Vec3<F>, y_axis: Vec3<F>, z_axis: Vec3<F>) -> Self {
        Mat3 { x_axis, y_axis, z_axis }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::from_diagonal(Vec3::splat(F::one()))
    }

    /// Non-uniform scale matrix.
    pub fn from_diagonal(d: Vec3<F>) -> Self {
        let o = F::zero();
        Mat3 {
            x_axis: Vec3::new(d.x, o, o),
            y_axis: Vec3::new(o, d.y, o),
            z_axis: Vec3::new(o, o, d.z),
        }
    }

    /// Rotation of `angle` radians about `axis` (Rodrigues' formula).
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3<F>, angle: F) -> Self {
        let Some(u) = axis.try_normalize(F::from_f32(1e-10)) else {
            return Self::identity();
        };
        let (s, c) = (angle.sin(), angle.cos());
        let t = F::one() - c;
        Mat3 {
            x_axis: Vec3::new(t * u.x * u.x + c, t * u.x * u.y + s * u.z, t * u.x * u.z - s * u.y),
            y_axis: Vec3::new(t * u.x * u.y - s * u.z, t * u.y * u.y + c, t * u.y * u.z + s * u.x),
            z_axis: Vec3::new(t * u.x * u.z + s * u.y, t * u.y * u.z - s * u.x, t * u.z * u.z + c),
        }
    }

    /// Matrix-vector product.
    pub fn mul_vec3(&self, v: Vec3<F>) -> Vec3<F> {
        self.x_axis.scale(v.x) + self.y_axis.scale(v.y) + self.z_axis.scale(v.z)
    }

    /// Matrix product `self * rhs`.
    pub fn mul_mat3(&self, rhs: &Self) -> Self {
        Mat3 {
            x_axis: self.mul_vec3(rhs.x_axis),
            y_axis: self.mul_vec3(rhs.y_axis),
            z_axis: self.mul_vec3(rhs.z_axis),
        }
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Mat3 {
            x_axis: Vec3::new(self.x_axis.x, self.y_axis.x, self.z_axis.x),
            y_axis: Vec3::new(self.x_axis.y, self.y_axis.y, self.z_axis.y),
            z_axis: Vec3::new(self.x_axis.z, self.y_axis.z, self.z_axis.z),
        }
    }

    /// Signed volume of the parallelepiped spanned by the columns.
    pub fn determinant(&self) -> F {
        self.z_axis.dot(self.x_axis.cross(self.y_axis))
    }

    /// Inverse via the adjugate, or `None` for a (near) singular matrix.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.is_near_zero(F::from_f32(1e-12)) || !det.is_finite() {
            return None;
        }
        let inv_det = F::one() / det;
        // Rows of the inverse are the cross products of the columns.
        let r0 = self.y_axis.cross(self.z_axis).scale(inv_det);
        let r1 = self.z_axis.cross(self.x_axis).scale(inv_det);
        let r2 = self.x_axis.cross(self.y_axis).scale(inv_det);
        Some(Mat3::from_cols(r0, r1, r2).transpose())
    }
}
