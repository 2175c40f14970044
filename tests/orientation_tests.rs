use glam::Vec3;
use pipes::math::{degrees_to_radians, Orientation, OrthonormalFrame, VectorExt};
use std::f32::consts::{FRAC_PI_2, PI};

#[cfg(test)]
mod orientation_tests {
    use super::*;

    fn assert_same_rotation(a: Orientation, b: Orientation) {
        // q and -q are the same rotation
        let dot = a.to_quat().dot(b.to_quat()).abs();
        assert!((dot - 1.0).abs() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let q = Orientation::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 1.234);
        let v = Vec3::new(0.3, -0.7, 0.2).normalize();
        assert!(q.inverse().rotate(q.rotate(v)).approx_eq(&v));
        assert_same_rotation(q * q.inverse(), Orientation::identity());
    }

    #[test]
    fn test_long_composition_stays_unit() {
        let step = Orientation::from_axis_angle(Vec3::new(0.3, 1.0, 0.2), 0.0137);
        let mut q = Orientation::identity();
        for i in 0..5000 {
            q *= step;
            assert!((q.magnitude() - 1.0).abs() < 1e-5, "drifted at step {}", i);
        }
    }

    #[test]
    fn test_composition_is_associative() {
        let a = Orientation::from_axis_angle(Vec3::X, 0.4);
        let b = Orientation::from_axis_angle(Vec3::Y, -1.1);
        let c = Orientation::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 2.5);
        assert_same_rotation((a * b) * c, a * (b * c));
    }

    #[test]
    fn test_composition_applies_right_to_left() {
        let yaw = Orientation::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let pitch = Orientation::from_axis_angle(Vec3::X, FRAC_PI_2);
        // Pitch first carries +z onto -y, which the yaw leaves alone
        assert!((yaw * pitch).rotate(Vec3::Z).approx_eq(&Vec3::NEG_Y));
        // Yaw first carries +z onto +x, which the pitch leaves alone
        assert!((pitch * yaw).rotate(Vec3::Z).approx_eq(&Vec3::X));
    }

    #[test]
    fn test_rotate_returns_unit_vector() {
        let q = Orientation::from_axis_angle(Vec3::Z, PI / 3.0);
        let rotated = q.rotate(Vec3::new(4.0, 0.0, 0.0));
        assert!((rotated.length() - 1.0).abs() < 1e-5);
        let preserved = q.rotate_preserving(Vec3::new(4.0, 0.0, 0.0));
        assert!((preserved.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_and_axis_round_trip() {
        let q = Orientation::from_axis_angle(Vec3::new(0.0, 0.0, 3.0), degrees_to_radians(60.0));
        assert!((q.angle() - degrees_to_radians(60.0)).abs() < 1e-5);
        assert!(q.axis().approx_eq(&Vec3::Z));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let q = Orientation::from_axis_angle(Vec3::ZERO, 1.0);
        assert_eq!(q, Orientation::identity());
        assert!(q.rotate(Vec3::X).approx_eq(&Vec3::X));
    }

    #[test]
    fn test_frames_stay_orthonormal_under_repeated_pans() {
        let step = Orientation::from_axis_angle(Vec3::new(1.0, 0.5, 0.25), 0.05);
        let mut camera = OrthonormalFrame::looking_down_neg_z();
        let mut head = OrthonormalFrame::world_aligned();
        for _ in 0..2000 {
            camera = camera.rotated_up(step);
            head = head.rotated_right(step);
        }
        assert!(camera.is_orthonormal(1e-4));
        assert!(head.is_orthonormal(1e-4));
    }

    #[test]
    fn test_zero_vector_normalise_is_noop() {
        let mut v = Vec3::ZERO;
        v.normalise();
        assert_eq!(v, Vec3::ZERO);
        assert!(!v.x.is_nan());
    }
}
