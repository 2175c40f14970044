use glam::{Mat4, Vec3, Vec4};

use super::orientation::Orientation;
use super::vector::VectorExt;

/// Right-handed orthonormal basis shared by the camera and chain heads
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrthonormalFrame {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl OrthonormalFrame {
    /// Rebuilds the basis from `forward` and an approximate `up`.
    ///
    /// Forward is kept, right is derived from it, then up is re-derived so all
    /// three axes end up mutually perpendicular even for a skewed hint.
    pub fn from_forward_up(forward: Vec3, up: Vec3) -> Self {
        let forward = forward.normalised();
        let right = forward.cross(up).normalised();
        let up = right.cross(forward).normalised();
        Self { forward, right, up }
    }

    /// Same reconstruction driven by an approximate `right` hint
    pub fn from_forward_right(forward: Vec3, right: Vec3) -> Self {
        let forward = forward.normalised();
        let up = forward.cross(right).normalised();
        let right = up.cross(forward).normalised();
        Self { forward, right, up }
    }

    /// Camera convention: looking down -z with +y up
    pub fn looking_down_neg_z() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }

    /// Chain head convention: forward +z, right +x, up +y
    pub fn world_aligned() -> Self {
        Self {
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }

    /// Rotates all three axes, then re-orthonormalises around the new forward/up
    pub fn rotated_up(&self, rotation: Orientation) -> Self {
        Self::from_forward_up(rotation.rotate(self.forward), rotation.rotate(self.up))
    }

    /// Rotates all three axes, then re-orthonormalises around the new forward/right
    pub fn rotated_right(&self, rotation: Orientation) -> Self {
        Self::from_forward_right(rotation.rotate(self.forward), rotation.rotate(self.right))
    }

    /// Basis-to-world rotation (columns right, up, forward)
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            Vec4::W,
        )
    }

    /// World-to-view rotation (rows right, up, -forward)
    pub fn view_rotation(&self) -> Mat4 {
        Mat4::from_cols(
            Vec4::new(self.right.x, self.up.x, -self.forward.x, 0.0),
            Vec4::new(self.right.y, self.up.y, -self.forward.y, 0.0),
            Vec4::new(self.right.z, self.up.z, -self.forward.z, 0.0),
            Vec4::W,
        )
    }

    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let unit = |v: Vec3| (v.length() - 1.0).abs() <= tolerance;
        unit(self.forward)
            && unit(self.right)
            && unit(self.up)
            && self.forward.dot(self.right).abs() <= tolerance
            && self.forward.dot(self.up).abs() <= tolerance
            && self.right.dot(self.up).abs() <= tolerance
    }
}

impl Default for OrthonormalFrame {
    fn default() -> Self {
        Self::looking_down_neg_z()
    }
}
