use glam::Vec3;

/// Plain 3D vector used throughout the crate
pub type Vector3 = Vec3;

/// Per-component tolerance for `approx_eq`
pub const VECTOR_TOLERANCE: f32 = 0.001;

/// Helpers glam does not provide with the semantics the chain and cameras need
pub trait VectorExt: Sized {
    /// Component-wise equality within `VECTOR_TOLERANCE`
    fn approx_eq(&self, other: &Self) -> bool;

    /// Unit-length copy, or the vector unchanged when its magnitude is exactly zero
    fn normalised(self) -> Self;

    /// In-place version of `normalised`
    fn normalise(&mut self);
}

impl VectorExt for Vec3 {
    fn approx_eq(&self, other: &Self) -> bool {
        (*self - *other).abs().max_element() <= VECTOR_TOLERANCE
    }

    fn normalised(self) -> Self {
        let length = self.length();
        if length != 0.0 {
            self / length
        } else {
            self
        }
    }

    fn normalise(&mut self) {
        *self = self.normalised();
    }
}
