use std::ops::{Mul, MulAssign};

use glam::{Mat4, Quat, Vec3};

use super::vector::VectorExt;

/// Unit quaternion rotation.
///
/// Every constructor and every product renormalises, so repeated composition
/// never drifts away from a pure rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orientation {
    quat: Quat,
}

fn renormalised(quat: Quat) -> Quat {
    let magnitude = quat.length();
    if magnitude != 0.0 {
        quat / magnitude
    } else {
        quat
    }
}

impl Orientation {
    pub const IDENTITY: Self = Self { quat: Quat::IDENTITY };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation of `angle` radians about `axis`. A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalised();
        let half = angle * 0.5;
        Self::from_parts(half.cos(), axis * half.sin())
    }

    /// Builds from a raw scalar and vector part, renormalising the result
    pub fn from_parts(w: f32, xyz: Vec3) -> Self {
        Self {
            quat: renormalised(Quat::from_xyzw(xyz.x, xyz.y, xyz.z, w)),
        }
    }

    pub fn w(&self) -> f32 {
        self.quat.w
    }

    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.quat.x, self.quat.y, self.quat.z)
    }

    /// Rotation angle in radians, in `[0, 2π]`
    pub fn angle(&self) -> f32 {
        2.0 * self.quat.w.clamp(-1.0, 1.0).acos()
    }

    /// Normalised rotation axis (zero for the identity)
    pub fn axis(&self) -> Vec3 {
        self.xyz().normalised()
    }

    pub fn magnitude(&self) -> f32 {
        self.quat.length()
    }

    pub fn conjugate(&self) -> Self {
        Self {
            quat: self.quat.conjugate(),
        }
    }

    /// Inverse rotation; equal to the conjugate since the quaternion is unit length
    pub fn inverse(&self) -> Self {
        self.conjugate()
    }

    /// Rotates `v` with the sandwich `q * v * q⁻¹`.
    ///
    /// The result is always unit length (or zero for a zero input); use
    /// [`Orientation::rotate_preserving`] when the magnitude matters.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let direction = v.normalised();
        let pure = Quat::from_xyzw(direction.x, direction.y, direction.z, 0.0);
        let rotated = self.quat * pure * self.quat.conjugate();
        Vec3::new(rotated.x, rotated.y, rotated.z).normalised()
    }

    /// Like `rotate` but rescales the result back to the input's magnitude
    pub fn rotate_preserving(&self, v: Vec3) -> Vec3 {
        self.rotate(v) * v.length()
    }

    pub fn to_quat(&self) -> Quat {
        self.quat
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_quat(self.quat)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Orientation {
    type Output = Orientation;

    /// Hamilton product, renormalised
    fn mul(self, rhs: Orientation) -> Orientation {
        let (w1, v1) = (self.w(), self.xyz());
        let (w2, v2) = (rhs.w(), rhs.xyz());
        Orientation::from_parts(w1 * w2 - v1.dot(v2), v1 * w2 + v2 * w1 + v1.cross(v2))
    }
}

impl MulAssign for Orientation {
    fn mul_assign(&mut self, rhs: Orientation) {
        *self = *self * rhs;
    }
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}
